//! Facade construction from YAML configuration files

use std::sync::Arc;
use tempfile::TempDir;
use texture_io::{
    ChannelFormat, DataType, FallbackKind, MipBufferShaper, MipSet, PixelSource, PluginManager,
    TextureIoError, texture_io_from_yaml,
};

#[test]
fn test_facade_from_yaml_file() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let config_path = dir.path().join("texture_io.yaml");
    std::fs::write(
        &config_path,
        "alternate_plugin_key: qt\nfallback: image_crate\n",
    )?;

    let io = texture_io_from_yaml(&config_path, Arc::new(PluginManager::new()))?;
    assert_eq!(io.config().fallback, FallbackKind::ImageCrate);
    assert_eq!(io.config().alternate_key()?.as_str(), "QT");

    let mut set = MipSet::new(2, 1, ChannelFormat::Bit8, DataType::XRGB);
    set.mip_levels = 1;
    set.reset_levels();
    MipBufferShaper::fill(&mut set, 0, 0, PixelSource::Rgba8(&[9, 8, 7, 0, 6, 5, 4, 0]))?;

    let image_path = dir.path().join("xrgb.png");
    io.save(&image_path, &mut set, false)?;

    let mut loaded = MipSet::default();
    io.load(&image_path, &mut loaded, false)?;
    assert_eq!(
        MipBufferShaper::read_rgba8(&loaded, 0, 0)?,
        vec![9, 8, 7, 255, 6, 5, 4, 255]
    );
    Ok(())
}

#[test]
fn test_invalid_yaml_config_is_rejected() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let config_path = dir.path().join("bad.yaml");
    std::fs::write(&config_path, "plugin_domain: \"\"\n")?;

    let err = texture_io_from_yaml(&config_path, Arc::new(PluginManager::new())).unwrap_err();
    assert!(matches!(err, TextureIoError::Config(_)));

    let missing = texture_io_from_yaml(dir.path().join("missing.yaml"), Arc::new(PluginManager::new()));
    assert!(matches!(missing, Err(TextureIoError::Io(_))));
    Ok(())
}
