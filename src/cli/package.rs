use kiln::build::Target;
use kiln::core::KilnResult;
use kiln::package::packager::BinaryPackager;
use std::path::PathBuf;

pub fn run(
    manifest_path: Option<PathBuf>,
    out: Option<PathBuf>,
    target: Option<String>,
) -> KilnResult<()> {
    let manifest = super::load_manifest(manifest_path)?;
    let target = target.as_deref().map(Target::new).transpose()?;
    let out = out.unwrap_or_else(|| manifest.root.join("dist"));

    let archive = BinaryPackager::new(&manifest).package(target, &out)?;

    println!("✓ Packaged: {}", archive.display());
    println!(
        "  Upload it to the release tagged {}",
        manifest.settings.format_tag(&manifest.package.version)
    );
    Ok(())
}
