use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::frame_snapshot::FrameSnapshot;
use crate::storage::write_ppm::write_ppm;
use log::info;
use std::path::Path;

/// Writes frames as PPM files, creating the target directory on demand.
#[derive(Debug, Clone, Copy, Default)]
pub struct PpmFilePresenter;

impl PpmFilePresenter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FilePresenterPort for PpmFilePresenter {
    fn present(&self, snapshot: &FrameSnapshot, filepath: impl AsRef<Path>) -> std::io::Result<()> {
        let filepath = filepath.as_ref();

        if let Some(dir) = filepath.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }

        write_ppm(snapshot, filepath)?;
        info!("saved {}x{} frame to {}", snapshot.width(), snapshot.height(), filepath.display());

        Ok(())
    }
}
