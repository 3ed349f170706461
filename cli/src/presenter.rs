use std::io::{self, Write};

use model::presentation::{Presentation, Presenter};

/// Writes every presentation as a pretty-printed JSON document.
pub struct JsonPresenter<W> {
    out: W,
}

impl<W: Write> JsonPresenter<W> {

    pub fn new(out: W) -> JsonPresenter<W> {
        JsonPresenter { out }
    }

    fn write(&mut self, presentation: Presentation<'_>) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, &presentation)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

impl<W: Write> Presenter for JsonPresenter<W> {
    fn present(&mut self, presentation: Presentation<'_>) {
        tracing::debug!(title = presentation.title(), "presenting result");

        if let Err(err) = self.write(presentation) {
            tracing::error!(%err, "failed to write presentation");
        }
    }
}
