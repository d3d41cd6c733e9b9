//! Output bundle on disk.
//!
//! One directory per identifier holding `README.md` and `assets/`. Every file
//! is written to a `.part` sibling first and renamed into place, so a rerun
//! overwrites the previous bundle file by file and an interrupted run never
//! leaves a truncated README behind.

mod writer;

pub use writer::write_atomic;

use crate::arxiv_id::ArxivId;
use crate::convert::{AssetReference, ASSETS_DIR};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Name of the Markdown file inside the bundle.
pub const README_NAME: &str = "README.md";

/// Path for the temp file: appends `.part` to the final path (e.g. `README.md` → `README.md.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Target layout for one paper: `<download-dir>/<id>[-v<version>]/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputBundle {
    root: PathBuf,
}

impl OutputBundle {
    pub fn new(download_dir: &Path, id: &ArxivId) -> Self {
        Self {
            root: download_dir.join(id.dir_name()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn readme_path(&self) -> PathBuf {
        self.root.join(README_NAME)
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.root.join(ASSETS_DIR)
    }

    /// Creates the directories, writes every asset, then the README. Returns
    /// the README path. Existing files at the same paths are replaced.
    pub fn write<'a, I>(&self, markdown: &str, assets: I) -> Result<PathBuf>
    where
        I: IntoIterator<Item = (&'a AssetReference, &'a [u8])>,
    {
        let assets_dir = self.assets_dir();
        std::fs::create_dir_all(&assets_dir).map_err(|e| Error::io(&assets_dir, e))?;

        for (asset, bytes) in assets {
            let path = assets_dir.join(&asset.file_name);
            write_atomic(&path, bytes).map_err(|e| Error::io(&path, e))?;
            tracing::debug!(path = %path.display(), bytes = bytes.len(), "asset written");
        }

        let readme = self.readme_path();
        write_atomic(&readme, markdown.as_bytes()).map_err(|e| Error::io(&readme, e))?;
        Ok(readme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn asset(name: &str) -> AssetReference {
        AssetReference {
            url: Url::parse(&format!("https://ar5iv.org/html/1706.03762/assets/{name}")).unwrap(),
            file_name: name.to_string(),
        }
    }

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("README.md"));
        assert_eq!(p.to_string_lossy(), "README.md.part");
        let p2 = temp_path(Path::new("/tmp/out/assets/x1.png"));
        assert_eq!(p2.to_string_lossy(), "/tmp/out/assets/x1.png.part");
    }

    #[test]
    fn layout_is_version_qualified() {
        let id = ArxivId::parse("2010.11929v2").unwrap();
        let bundle = OutputBundle::new(Path::new("out"), &id);
        assert_eq!(bundle.root(), Path::new("out/2010.11929-v2"));
        assert_eq!(bundle.readme_path(), Path::new("out/2010.11929-v2/README.md"));
        assert_eq!(bundle.assets_dir(), Path::new("out/2010.11929-v2/assets"));
    }

    #[test]
    fn writes_readme_and_assets() {
        let dir = tempfile::tempdir().unwrap();
        let id = ArxivId::parse("1706.03762").unwrap();
        let bundle = OutputBundle::new(dir.path(), &id);
        let (a, b) = (asset("x1.png"), asset("x2.png"));
        let readme = bundle
            .write(
                "# Attention\n",
                [(&a, b"one".as_slice()), (&b, b"two".as_slice())],
            )
            .unwrap();

        assert_eq!(readme, dir.path().join("1706.03762/README.md"));
        assert_eq!(std::fs::read_to_string(&readme).unwrap(), "# Attention\n");
        assert_eq!(std::fs::read(bundle.assets_dir().join("x1.png")).unwrap(), b"one");
        assert_eq!(std::fs::read(bundle.assets_dir().join("x2.png")).unwrap(), b"two");
    }

    #[test]
    fn assets_dir_exists_even_without_assets() {
        let dir = tempfile::tempdir().unwrap();
        let id = ArxivId::parse("math/0301234").unwrap();
        let bundle = OutputBundle::new(dir.path(), &id);
        bundle.write("text", std::iter::empty()).unwrap();
        assert!(bundle.assets_dir().is_dir());
        assert!(dir.path().join("math_0301234/README.md").is_file());
    }

    #[test]
    fn rerun_overwrites_to_same_state() {
        let dir = tempfile::tempdir().unwrap();
        let id = ArxivId::parse("1706.03762").unwrap();
        let bundle = OutputBundle::new(dir.path(), &id);
        let a = asset("x1.png");

        bundle.write("first", [(&a, b"old".as_slice())]).unwrap();
        bundle.write("second", [(&a, b"new".as_slice())]).unwrap();
        bundle.write("second", [(&a, b"new".as_slice())]).unwrap();

        assert_eq!(std::fs::read_to_string(bundle.readme_path()).unwrap(), "second");
        assert_eq!(std::fs::read(bundle.assets_dir().join("x1.png")).unwrap(), b"new");
        let names: Vec<_> = std::fs::read_dir(bundle.assets_dir())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, ["x1.png"]);
    }

    #[test]
    fn very_long_image_name_is_writable() {
        let dir = tempfile::tempdir().unwrap();
        let id = ArxivId::parse("1706.03762").unwrap();
        let bundle = OutputBundle::new(dir.path(), &id);
        let mut namer = crate::asset_name::AssetNamer::new();
        let assets: Vec<AssetReference> = ["a", "b"]
            .iter()
            .map(|sub| {
                let url = Url::parse(&format!(
                    "https://ar5iv.org/html/1706.03762/{sub}/{}.png",
                    "x".repeat(300)
                ))
                .unwrap();
                let file_name = namer.assign(&url);
                AssetReference { url, file_name }
            })
            .collect();

        bundle
            .write(
                "long names",
                assets.iter().map(|a| (a, b"png".as_slice())),
            )
            .unwrap();
        for a in &assets {
            assert_eq!(std::fs::read(bundle.assets_dir().join(&a.file_name)).unwrap(), b"png");
        }
    }

    #[cfg(unix)]
    #[test]
    fn unwritable_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"not a dir").unwrap();
        let id = ArxivId::parse("1706.03762").unwrap();
        let bundle = OutputBundle::new(&blocker, &id);
        match bundle.write("x", std::iter::empty()) {
            Err(Error::Io { path, .. }) => assert!(path.starts_with(&blocker)),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
