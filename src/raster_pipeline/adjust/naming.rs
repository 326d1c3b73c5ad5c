use std::path::{Path, PathBuf};

/// Kind of generated image; decides the output file name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// Histogram 2SD colour balance, converted to 8 bits.
    ColorBalance,
    /// Luminance-matched brightness shift.
    Brightness,
    /// Source copy tagged with a no-data value of 0.
    RemoveBorder,
}

impl OutputKind {
    pub fn prefix(self) -> &'static str {
        match self {
            OutputKind::ColorBalance => "8bit_hist2sd_",
            OutputKind::Brightness => "brightness_",
            OutputKind::RemoveBorder => "no_border_",
        }
    }

    /// `<output_dir>/<prefix><file name of source>`.
    pub fn output_path(self, output_dir: &Path, source_name: &str) -> PathBuf {
        let base = Path::new(source_name)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| source_name.to_string());
        output_dir.join(format!("{}{}", self.prefix(), base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(OutputKind::ColorBalance.prefix(), "8bit_hist2sd_");
        assert_eq!(OutputKind::Brightness.prefix(), "brightness_");
        assert_eq!(OutputKind::RemoveBorder.prefix(), "no_border_");
    }

    #[test]
    fn test_output_path_uses_basename() {
        let path = OutputKind::Brightness.output_path(Path::new("/out"), "/data/tiles/scene_01.tif");
        assert_eq!(path, PathBuf::from("/out/brightness_scene_01.tif"));

        let path = OutputKind::ColorBalance.output_path(Path::new("."), "scene.tif");
        assert_eq!(path, PathBuf::from("./8bit_hist2sd_scene.tif"));
    }
}
