use crate::models::{Config, DataSourceMode, DisasterRecord, NgoRecord, ResourceKind};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

pub struct DatasetLoader {
    client: reqwest::Client,
}

impl DatasetLoader {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Load both datasets according to the configured data source mode.
    /// `Both` concatenates local records first, then remote.
    pub async fn load_datasets(&self, config: &Config) -> Result<(Vec<DisasterRecord>, Vec<NgoRecord>)> {
        let mut disasters: Vec<DisasterRecord> = Vec::new();
        let mut ngos: Vec<NgoRecord> = Vec::new();

        if matches!(config.data_source_mode, DataSourceMode::Local | DataSourceMode::Both) {
            let data_dir = config.data_directory.as_deref().unwrap_or("data");
            disasters.extend(self.load_file::<Vec<DisasterRecord>>(
                &Path::new(data_dir).join("disaster_data.json"),
            )?);
            ngos.extend(self.load_file::<Vec<NgoRecord>>(
                &Path::new(data_dir).join("ngo_data.json"),
            )?);
        }

        if matches!(config.data_source_mode, DataSourceMode::Internet | DataSourceMode::Both) {
            let disaster_url = config
                .disaster_data_url
                .as_deref()
                .context("data_source_mode requires disaster_data_url to be set")?;
            let ngo_url = config
                .ngo_data_url
                .as_deref()
                .context("data_source_mode requires ngo_data_url to be set")?;
            disasters.extend(self.fetch_url::<Vec<DisasterRecord>>(disaster_url).await?);
            ngos.extend(self.fetch_url::<Vec<NgoRecord>>(ngo_url).await?);
        }

        validate_disasters(&disasters)?;
        validate_ngos(&ngos)?;

        Ok((disasters, ngos))
    }

    fn load_file<T: serde::de::DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON in: {}", path.display()))
    }

    async fn fetch_url<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        println!("🌐 Fetching data from: {}", url);

        let response = self
            .client
            .get(url)
            .timeout(std::time::Duration::from_secs(30))
            .send()
            .await
            .with_context(|| format!("Failed to fetch URL: {}", url))?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "HTTP request failed with status: {}",
                response.status()
            ));
        }

        let content = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from: {}", url))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON from: {}", url))
    }
}

/// Exactly one disaster record per region is expected; duplicates would make
/// region lookup ambiguous.
fn validate_disasters(disasters: &[DisasterRecord]) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::new();
    for record in disasters {
        if !seen.insert(record.region.as_str()) {
            anyhow::bail!("Duplicate disaster record for region: {}", record.region);
        }
    }
    Ok(())
}

/// Pledges must use one of the six known resource keys. A typoed key would
/// otherwise be summed into a total nothing ever reads.
fn validate_ngos(ngos: &[NgoRecord]) -> Result<()> {
    for ngo in ngos {
        for key in ngo.resources.keys() {
            if ResourceKind::from_key(key).is_none() {
                anyhow::bail!(
                    "NGO '{}' pledges unknown resource '{}' (expected one of: {})",
                    ngo.name,
                    key,
                    ResourceKind::ALL
                        .iter()
                        .map(|k| k.key())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ngo(name: &str, resources: &[(&str, u64)]) -> NgoRecord {
        NgoRecord {
            name: name.to_string(),
            supported_regions: vec!["North Province".to_string()],
            resources: resources
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            volunteers_available: 0,
        }
    }

    fn disaster(region: &str) -> DisasterRecord {
        DisasterRecord {
            region: region.to_string(),
            disaster_type: "Flood".to_string(),
            people_affected: 100,
            duration_days: 2,
        }
    }

    #[test]
    fn duplicate_regions_are_rejected() {
        let records = vec![disaster("North Province"), disaster("North Province")];
        let err = validate_disasters(&records).unwrap_err();
        assert!(err.to_string().contains("North Province"));
    }

    #[test]
    fn distinct_regions_pass_validation() {
        let records = vec![disaster("North Province"), disaster("South Province")];
        assert!(validate_disasters(&records).is_ok());
    }

    #[test]
    fn unknown_resource_key_is_rejected_with_ngo_name() {
        let records = vec![ngo("Helping Hands", &[("Blankets", 10)])];
        let err = validate_ngos(&records).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Helping Hands"));
        assert!(message.contains("Blankets"));
    }

    #[test]
    fn known_resource_keys_pass_validation() {
        let records = vec![ngo(
            "Helping Hands",
            &[("Food_Packets", 4000), ("Water_Litres", 1000), ("Tents", 50)],
        )];
        assert!(validate_ngos(&records).is_ok());
    }

    #[test]
    fn dataset_arrays_deserialize() {
        let json = r#"[
            {"Region": "North Province", "Disaster_Type": "Flood",
             "People_Affected": 1000, "Disaster_Duration_Days": 3},
            {"Region": "South Province", "Disaster_Type": "Earthquake",
             "People_Affected": 500, "Disaster_Duration_Days": 7}
        ]"#;
        let records: Vec<DisasterRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 2);
        assert!(validate_disasters(&records).is_ok());
    }
}
