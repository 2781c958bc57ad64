use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub default_region: Option<String>,
    // Data source configuration
    pub data_source_mode: DataSourceMode,
    pub data_directory: Option<String>,
    pub disaster_data_url: Option<String>,
    pub ngo_data_url: Option<String>,
    pub output_directory: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DataSourceMode {
    #[serde(rename = "local")]
    Local,
    #[serde(rename = "internet")]
    Internet,
    #[serde(rename = "both")]
    Both,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_region: None,
            data_source_mode: DataSourceMode::Local,
            data_directory: Some("data".to_string()),
            disaster_data_url: Some("https://example.com/disaster_data.json".to_string()),
            ngo_data_url: Some("https://example.com/ngo_data.json".to_string()),
            output_directory: Some("output".to_string()),
        }
    }
}

impl Config {
    pub fn load_from_file(file_path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(file_path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, file_path: &str) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(file_path, content)?;
        Ok(())
    }
}

/// One disaster record per region, loaded once and read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisasterRecord {
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Disaster_Type")]
    pub disaster_type: String,
    #[serde(rename = "People_Affected")]
    pub people_affected: u64,
    #[serde(rename = "Disaster_Duration_Days")]
    pub duration_days: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NgoRecord {
    #[serde(rename = "NGO_Name")]
    pub name: String,
    #[serde(rename = "Supported_Regions")]
    pub supported_regions: Vec<String>,
    #[serde(rename = "Resources")]
    pub resources: HashMap<String, u64>,
    #[serde(rename = "Volunteers_Available", default)]
    pub volunteers_available: u64,
}

impl NgoRecord {
    pub fn supports(&self, region: &str) -> bool {
        self.supported_regions.iter().any(|r| r == region)
    }
}

/// The six resource types the estimator knows about. Pledges in the NGO data
/// use the `key()` spelling; anything else is a malformed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    FoodPackets,
    WaterLitres,
    Tents,
    MedicalTeams,
    HygieneKits,
    Volunteers,
}

impl ResourceKind {
    /// Fixed display/estimation order, matching the requirement table.
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::FoodPackets,
        ResourceKind::WaterLitres,
        ResourceKind::Tents,
        ResourceKind::MedicalTeams,
        ResourceKind::HygieneKits,
        ResourceKind::Volunteers,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ResourceKind::FoodPackets => "Food_Packets",
            ResourceKind::WaterLitres => "Water_Litres",
            ResourceKind::Tents => "Tents",
            ResourceKind::MedicalTeams => "Medical_Teams",
            ResourceKind::HygieneKits => "Hygiene_Kits",
            ResourceKind::Volunteers => "Volunteers_Available",
        }
    }

    pub fn from_key(key: &str) -> Option<ResourceKind> {
        ResourceKind::ALL.into_iter().find(|kind| kind.key() == key)
    }

    pub fn label(&self) -> String {
        self.key().replace('_', " ")
    }

    /// Standardized per-person/per-day requirement:
    /// 2 food packets and 5 litres of water per person per day,
    /// 1 tent per 5 people, 1 medical team per 500 people,
    /// 1 hygiene kit per person, 1 volunteer per 50 people.
    pub fn required(&self, people: u64, days: u64) -> u64 {
        match self {
            ResourceKind::FoodPackets => 2u64.saturating_mul(people).saturating_mul(days),
            ResourceKind::WaterLitres => 5u64.saturating_mul(people).saturating_mul(days),
            ResourceKind::Tents => people / 5,
            ResourceKind::MedicalTeams => people / 500,
            ResourceKind::HygieneKits => people,
            ResourceKind::Volunteers => people / 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_kind_keys_round_trip() {
        for kind in ResourceKind::ALL {
            assert_eq!(ResourceKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(ResourceKind::from_key("Blankets"), None);
        assert_eq!(ResourceKind::from_key("food_packets"), None);
    }

    #[test]
    fn labels_replace_underscores() {
        assert_eq!(ResourceKind::FoodPackets.label(), "Food Packets");
        assert_eq!(ResourceKind::Volunteers.label(), "Volunteers Available");
    }

    #[test]
    fn disaster_record_uses_dataset_field_names() {
        let json = r#"{
            "Region": "North Province",
            "Disaster_Type": "Flood",
            "People_Affected": 1000,
            "Disaster_Duration_Days": 3
        }"#;
        let record: DisasterRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.region, "North Province");
        assert_eq!(record.disaster_type, "Flood");
        assert_eq!(record.people_affected, 1000);
        assert_eq!(record.duration_days, 3);
    }

    #[test]
    fn ngo_record_defaults_missing_volunteers_to_zero() {
        let json = r#"{
            "NGO_Name": "Helping Hands",
            "Supported_Regions": ["North Province"],
            "Resources": {"Food_Packets": 4000}
        }"#;
        let record: NgoRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.volunteers_available, 0);
        assert!(record.supports("North Province"));
        assert!(!record.supports("South Province"));
    }

    #[test]
    fn negative_pledge_is_rejected_at_deserialization() {
        let json = r#"{
            "NGO_Name": "Helping Hands",
            "Supported_Regions": [],
            "Resources": {"Tents": -5}
        }"#;
        assert!(serde_json::from_str::<NgoRecord>(json).is_err());
    }
}
