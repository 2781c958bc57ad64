mod estimator;
mod loader;
mod models;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use estimator::{RegionSupport, ShortfallRow};
use models::{Config, DisasterRecord, NgoRecord};
use std::fs;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("relief-estimator")
        .version("1.0")
        .about("Estimates disaster relief resource shortages from NGO pledges")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("config.toml"),
        )
        .arg(
            Arg::new("region")
                .short('r')
                .long("region")
                .value_name("REGION")
                .help("Region to estimate (overrides default_region from the config)"),
        )
        .arg(
            Arg::new("list-regions")
                .long("list-regions")
                .help("List the regions present in the disaster dataset and exit")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let config_file = matches.get_one::<String>("config").unwrap();

    // Load or create configuration
    let config = if Path::new(config_file).exists() {
        println!("📋 Loading configuration from: {}", config_file);
        Config::load_from_file(config_file)?
    } else {
        println!("📝 Creating default configuration file: {}", config_file);
        let default_config = Config::default();
        default_config.save_to_file(config_file)?;
        println!(
            "⚠️  Please edit {} (data paths, default region), then run the program again.",
            config_file
        );
        return Ok(());
    };

    // Load the two datasets
    let loader = loader::DatasetLoader::new();
    let (disasters, ngos) = loader.load_datasets(&config).await?;
    println!(
        "📂 Loaded {} disaster records and {} NGO records",
        disasters.len(),
        ngos.len()
    );

    if matches.get_flag("list-regions") {
        println!("🗺️  Known regions:");
        for record in &disasters {
            println!("   - {} ({})", record.region, record.disaster_type);
        }
        return Ok(());
    }

    // Resolve the selected region; estimating without one would silently
    // produce a meaningless all-zero table, so fail instead.
    let region = matches
        .get_one::<String>("region")
        .cloned()
        .or_else(|| config.default_region.clone())
        .context("No region selected: pass --region or set default_region in the config")?;

    let disaster = disasters
        .iter()
        .find(|record| record.region == region)
        .with_context(|| {
            format!(
                "No disaster record for region '{}' (known regions: {})",
                region,
                disasters
                    .iter()
                    .map(|r| r.region.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })?;

    println!("🔍 Estimating relief shortages for region: {}", region);

    // Aggregate NGO support, then estimate shortages
    let support = estimator::aggregate(&region, &ngos);
    let rows = estimator::estimate(disaster, &support);

    print_summary(disaster, &ngos, &support, &rows);

    // Generate reports
    let output_dir = config.output_directory.as_deref().unwrap_or("output");
    fs::create_dir_all(output_dir)?;
    clean_output_directory(output_dir)?;

    generate_shortage_csv(&rows, output_dir)?;
    generate_ngo_support_csv(&region, &ngos, output_dir)?;
    generate_summary_report(disaster, &support, &rows, output_dir)?;

    println!("\n✅ Estimation complete!");
    println!("📂 Reports written to: {}", output_dir);
    Ok(())
}

fn print_summary(
    disaster: &DisasterRecord,
    ngos: &[NgoRecord],
    support: &RegionSupport,
    rows: &[ShortfallRow],
) {
    println!("\n📍 Region: {}", disaster.region);
    println!("⚠️  Disaster: {}", disaster.disaster_type);
    println!("👥 People affected: {}", disaster.people_affected);
    println!("📆 Duration: {} days", disaster.duration_days);

    println!("\n🤝 Supporting NGOs ({}):", support.supporting_ngos.len());
    for ngo in ngos.iter().filter(|n| n.supports(&disaster.region)) {
        println!("   {}", ngo.name);
        for (resource, qty) in &ngo.resources {
            println!("      - {}: {}", resource.replace('_', " "), qty);
        }
        println!("      - 👥 Volunteers: {}", ngo.volunteers_available);
    }
    if support.supporting_ngos.is_empty() {
        println!("   (none)");
    }

    println!("\n📦 Total available resources:");
    for kind in models::ResourceKind::ALL {
        if let Some(qty) = support.totals.get(&kind) {
            println!("   - {}: {}", kind.label(), qty);
        }
    }
    println!("   - 👥 Volunteers: {}", support.total_volunteers);

    println!("\n📊 ESTIMATED RESOURCES NEEDED");
    println!("{:<22} {:>10} {:>10} {:>10}", "Resource", "Required", "Available", "Shortage");
    for row in rows {
        println!(
            "{:<22} {:>10} {:>10} {:>10}",
            row.resource.label(),
            row.required,
            row.available,
            row.shortage
        );
    }
}

fn generate_shortage_csv(rows: &[ShortfallRow], output_dir: &str) -> Result<()> {
    use csv::Writer;

    let csv_path = Path::new(output_dir).join("shortage_table.csv");
    let mut writer = Writer::from_path(csv_path)?;

    writer.write_record(["Resource", "Required", "Available", "Shortage"])?;
    for row in rows {
        writer.write_record(&[
            row.resource.label(),
            row.required.to_string(),
            row.available.to_string(),
            row.shortage.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn generate_ngo_support_csv(region: &str, ngos: &[NgoRecord], output_dir: &str) -> Result<()> {
    use csv::Writer;
    use models::ResourceKind;

    let csv_path = Path::new(output_dir).join("ngo_support.csv");
    let mut writer = Writer::from_path(csv_path)?;

    let mut header = vec!["NGO".to_string()];
    header.extend(ResourceKind::ALL.iter().map(|k| k.label()));
    header.push("Volunteers".to_string());
    writer.write_record(&header)?;

    for ngo in ngos.iter().filter(|n| n.supports(region)) {
        let mut record = vec![ngo.name.clone()];
        for kind in ResourceKind::ALL {
            let qty = ngo.resources.get(kind.key()).copied().unwrap_or(0);
            record.push(qty.to_string());
        }
        record.push(ngo.volunteers_available.to_string());
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

fn generate_summary_report(
    disaster: &DisasterRecord,
    support: &RegionSupport,
    rows: &[ShortfallRow],
    output_dir: &str,
) -> Result<()> {
    let mut content = String::new();
    content.push_str(&format!("Relief Shortage Estimate: {}\n", disaster.region));
    content.push_str("=====================================\n\n");
    content.push_str(&format!("Disaster type: {}\n", disaster.disaster_type));
    content.push_str(&format!("People affected: {}\n", disaster.people_affected));
    content.push_str(&format!("Duration: {} days\n\n", disaster.duration_days));

    content.push_str("Supporting NGOs:\n");
    if support.supporting_ngos.is_empty() {
        content.push_str("   (none)\n");
    }
    for name in &support.supporting_ngos {
        content.push_str(&format!("   - {}\n", name));
    }
    content.push_str(&format!(
        "Total volunteers available: {}\n\n",
        support.total_volunteers
    ));

    content.push_str("Shortage table:\n");
    for row in rows {
        content.push_str(&format!(
            "   {}: required {}, available {}, shortage {}\n",
            row.resource.label(),
            row.required,
            row.available,
            row.shortage
        ));
    }

    content.push_str(
        "\nAssumptions (per person / per day):\n\
        - Food Packets: 2 packets per person per day\n\
        - Water Litres: 5 litres per person per day\n\
        - Tents: 1 tent per 5 people\n\
        - Medical Teams: 1 team per 500 people\n\
        - Hygiene Kits: 1 kit per person\n\
        - Volunteers: 1 per 50 people\n",
    );

    fs::write(Path::new(output_dir).join("summary.txt"), content)?;
    Ok(())
}

// Clean up previous results from output directory
fn clean_output_directory(output_dir: &str) -> Result<()> {
    let output_path = Path::new(output_dir);

    if !output_path.exists() {
        return Ok(());
    }

    let items_to_clean = ["shortage_table.csv", "ngo_support.csv", "summary.txt"];

    for item in &items_to_clean {
        let item_path = output_path.join(item);
        if item_path.exists() {
            fs::remove_file(&item_path)?;
        }
    }

    Ok(())
}
