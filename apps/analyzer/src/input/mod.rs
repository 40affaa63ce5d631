//! InputCollector: the two user-supplied inputs as independent observable cells.
//!
//! Pure storage: no validation happens here. The controller decides whether
//! the current contents are submittable.

pub mod document;

use tokio::sync::watch;

use crate::input::document::ResumeFile;

pub struct InputCollector {
    file: watch::Sender<Option<ResumeFile>>,
    job_description: watch::Sender<String>,
}

impl Default for InputCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl InputCollector {
    pub fn new() -> Self {
        let (file, _) = watch::channel(None);
        let (job_description, _) = watch::channel(String::new());
        Self {
            file,
            job_description,
        }
    }

    pub fn select_file(&self, file: ResumeFile) {
        self.file.send_replace(Some(file));
    }

    pub fn clear_file(&self) {
        self.file.send_replace(None);
    }

    pub fn set_job_description(&self, text: impl Into<String>) {
        self.job_description.send_replace(text.into());
    }

    pub fn selected_file(&self) -> Option<ResumeFile> {
        self.file.borrow().clone()
    }

    pub fn has_file(&self) -> bool {
        self.file.borrow().is_some()
    }

    pub fn job_description(&self) -> String {
        self.job_description.borrow().clone()
    }

    pub fn subscribe_file(&self) -> watch::Receiver<Option<ResumeFile>> {
        self.file.subscribe()
    }

    pub fn subscribe_job_description(&self) -> watch::Receiver<String> {
        self.job_description.subscribe()
    }

    /// Owned copies of both cells, taken together.
    pub fn snapshot(&self) -> (Option<ResumeFile>, String) {
        (self.selected_file(), self.job_description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf(name: &str) -> ResumeFile {
        ResumeFile::from_bytes(name, "application/pdf", b"%PDF".to_vec()).unwrap()
    }

    #[test]
    fn test_starts_empty() {
        let inputs = InputCollector::new();
        assert!(!inputs.has_file());
        assert_eq!(inputs.job_description(), "");
    }

    #[test]
    fn test_cells_are_independent() {
        let inputs = InputCollector::new();
        inputs.set_job_description("Rust engineer");
        assert!(!inputs.has_file());

        inputs.select_file(pdf("a.pdf"));
        inputs.clear_file();
        assert_eq!(inputs.job_description(), "Rust engineer");
    }

    #[test]
    fn test_snapshot_is_not_affected_by_later_edits() {
        let inputs = InputCollector::new();
        inputs.select_file(pdf("first.pdf"));
        inputs.set_job_description("first");

        let (file, jd) = inputs.snapshot();

        inputs.select_file(pdf("second.pdf"));
        inputs.set_job_description("second");

        assert_eq!(file.unwrap().name(), "first.pdf");
        assert_eq!(jd, "first");
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let inputs = InputCollector::new();
        let mut jd_rx = inputs.subscribe_job_description();
        let mut file_rx = inputs.subscribe_file();

        inputs.set_job_description("Backend role");
        jd_rx.changed().await.unwrap();
        assert_eq!(*jd_rx.borrow_and_update(), "Backend role");

        inputs.select_file(pdf("cv.pdf"));
        file_rx.changed().await.unwrap();
        assert_eq!(file_rx.borrow_and_update().as_ref().unwrap().name(), "cv.pdf");
    }
}
