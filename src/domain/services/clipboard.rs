use anyhow::anyhow;
use anyhow::Result;
use once_cell::sync::OnceCell;
use tokio::sync::mpsc;

static COPIES: OnceCell<mpsc::UnboundedSender<String>> = OnceCell::new();

/// Owns the system clipboard on its own task so copies never block the UI.
pub struct ClipboardService {
    clipboard: arboard::Clipboard,
    copies: mpsc::UnboundedReceiver<String>,
}

impl ClipboardService {
    /// Opens the system clipboard and registers the service as the target of
    /// `set`. Fails on systems without a clipboard, in which case copies are
    /// reported as unavailable.
    pub fn open() -> Result<ClipboardService> {
        let clipboard = arboard::Clipboard::new()?;
        let (tx, copies) = mpsc::unbounded_channel::<String>();
        COPIES
            .set(tx)
            .map_err(|_| return anyhow!("Clipboard service was opened twice."))?;

        return Ok(ClipboardService { clipboard, copies });
    }

    pub async fn run(mut self) -> Result<()> {
        while let Some(text) = self.copies.recv().await {
            let len = text.len();
            match self.clipboard.set_text(text) {
                Ok(()) => tracing::debug!(len = len, "Copied to clipboard"),
                Err(err) => tracing::error!(error = ?err, "Failed to write to clipboard"),
            }
        }

        return Ok(());
    }

    pub fn set(text: String) -> Result<()> {
        let Some(tx) = COPIES.get() else {
            return Err(anyhow!("Clipboard is not available on this system."));
        };

        tx.send(text)?;
        return Ok(());
    }
}
