use std::{path::Path, time::Duration};

use anyhow::Context as _;
use netpad_core::Document;
use netpad_messages::Snapshot;
use netpad_server::{spawn_mirror, Address, MirrorHandle};
use netpad_syntax::Language;
use tokio::time::{interval, MissedTickBehavior};

/// Time given to connection tasks to flush their goodbyes
const SHUTDOWN_GRACE: Duration = Duration::from_millis(200);

pub(crate) struct ServeOptions<'a> {
    pub file: &'a Path,
    pub language: Option<Language>,
    pub listen: Address,
    pub poll_interval: Duration,
}

pub(crate) fn run(opts: ServeOptions) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(serve(opts))
}

async fn serve(opts: ServeOptions<'_>) -> anyhow::Result<()> {
    let mut doc = Document::open(opts.file)?;
    if let Some(language) = opts.language {
        doc.set_language(language);
    }

    let (handle, addr) = spawn_mirror(opts.listen)
        .await
        .context("Failed to start mirror")?;
    println!(
        "Mirroring {} ({}) at {}",
        opts.file.display(),
        doc.language(),
        addr.as_connect()
    );

    let result = poll(&mut doc, opts.file, opts.poll_interval, &handle).await;

    handle.shutdown().await;
    tokio::time::sleep(SHUTDOWN_GRACE).await;
    result
}

/// Publish the document and keep republishing it whenever the file changes,
/// until interrupted.
async fn poll(
    doc: &mut Document,
    file: &Path,
    every: Duration,
    handle: &MirrorHandle,
) -> anyhow::Result<()> {
    handle.publish(snapshot(doc)).await?;

    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            res = tokio::signal::ctrl_c() => {
                res?;
                log::info!("Interrupted, shutting down");
                return Ok(());
            }
        }

        let text = match tokio::fs::read_to_string(file).await {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Failed to read {file:?}: {e}");
                continue;
            }
        };

        if doc.set_text(text) {
            log::info!("{file:?} changed, revision {}", doc.revision());
            handle.publish(snapshot(doc)).await?;
        }
    }
}

fn snapshot(doc: &Document) -> Snapshot {
    Snapshot {
        revision: doc.revision(),
        language: doc.language(),
        text: doc.text().to_string(),
    }
}
