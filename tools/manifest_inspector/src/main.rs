use provseal_core::manifest::checksum::calculate_file_checksum;
use provseal_core::manifest::read_manifest;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("usage: manifest_inspector <path/to/manifest.json> [--check-files]");
        std::process::exit(2);
    }
    let path = std::path::Path::new(&args[1]);
    let check_files = args.iter().any(|a| a == "--check-files");

    let result = match read_manifest(path) {
        Ok(Some(r)) => r,
        Ok(None) => {
            eprintln!("manifest not found: {}", path.display());
            std::process::exit(2);
        }
        Err(e) => {
            eprintln!("inspector error: {}", e);
            std::process::exit(1);
        }
    };

    let mut drifted: Vec<String> = Vec::new();
    let mut unreadable: Vec<String> = Vec::new();
    if check_files {
        let base = path.parent().unwrap_or_else(|| std::path::Path::new("."));
        for asset in &result.manifest.assets {
            let file = base.join(&asset.file_name);
            match calculate_file_checksum(&file) {
                Ok(sha256) if sha256 == asset.sha256 => {}
                Ok(_) => drifted.push(asset.asset_id.clone()),
                Err(_) => unreadable.push(asset.file_name.clone()),
            }
        }
    }

    let summary = serde_json::json!({
        "manifestVersion": result.manifest.manifest_version,
        "exportId": result.manifest.export_id,
        "businessName": result.manifest.business_name,
        "totalAssets": result.manifest.total_assets,
        "tierCounts": result.manifest.tier_counts,
        "integrity": if result.integrity_ok { "VERIFIED" } else { "MISMATCH" },
        "warning": result.warning,
        "driftedAssets": drifted,
        "unreadableFiles": unreadable,
    });
    println!("{}", serde_json::to_string_pretty(&summary).unwrap());

    if result.integrity_ok && drifted.is_empty() {
        std::process::exit(0);
    }
    std::process::exit(1);
}
