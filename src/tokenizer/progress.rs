// src/tokenizer/progress.rs

// Progress reporting for long merge replays. Backed by indicatif when the
// "progressbar" feature is enabled, otherwise a no-op with the same surface.

#[cfg(feature = "progressbar")]
pub(crate) use indicatif::{ProgressBar, ProgressStyle};

#[cfg(not(feature = "progressbar"))]
pub(crate) use noop::{ProgressBar, ProgressStyle};

#[cfg(not(feature = "progressbar"))]
mod noop {
    use std::borrow::Cow;

    pub struct ProgressBar;

    impl ProgressBar {
        pub fn new(_length: u64) -> Self {
            Self {}
        }

        pub fn set_message(&self, _message: impl Into<Cow<'static, str>>) {}
        pub fn set_style(&self, _style: ProgressStyle) {}
        pub fn inc(&self, _inc: u64) {}
        pub fn finish(&self) {}
    }

    pub struct ProgressStyle;

    impl ProgressStyle {
        pub fn default_bar() -> Self {
            Self {}
        }

        pub fn template(self, _template: &str) -> Result<Self, String> {
            Ok(self)
        }
    }
}

/// Progress bar over merge rules, or `None` when progress is disabled.
pub(crate) fn merge_progress(n_merges: usize, n_symbols: usize, show: bool) -> Option<ProgressBar> {
    if !show {
        return None;
    }
    let p = ProgressBar::new(n_merges as u64);
    match ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {msg:<30!} {wide_bar} {pos:>9!}/{len:<9!}")
    {
        Ok(style) => p.set_style(style),
        Err(e) => log::debug!("Falling back to default progress style: {}", e),
    }
    p.set_message(format!("Merging {} symbols", n_symbols));
    Some(p)
}
