// src/engine.rs
use crate::source::RecordSource;
use crate::types::{EngineCommand, EngineEvent};
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

/// Run the fetch loop on a background thread. The GUI stays responsive
/// while pages and recordings load; results come back over `tx`.
///
/// Transient source failures are retried once here. The viewer core never
/// retries anything.
pub fn spawn_thread(
    mut source: Box<dyn RecordSource>,
    tx: Sender<EngineEvent>,
    rx_cmd: Receiver<EngineCommand>,
) {
    thread::spawn(move || {
        log::info!("fetch engine ready");
        while let Ok(cmd) = rx_cmd.recv() {
            let event = handle(source.as_mut(), cmd);
            if tx.send(event).is_err() {
                // GUI is gone; nothing left to serve.
                break;
            }
        }
        log::info!("fetch engine shutting down");
    });
}

fn handle(source: &mut dyn RecordSource, cmd: EngineCommand) -> EngineEvent {
    match cmd {
        EngineCommand::LoadPage { limit, page } => {
            match with_retry(|| source.fetch_page(limit, page)) {
                Ok(page) => EngineEvent::Page(page),
                Err(err) => EngineEvent::Error(format!("failed to load records: {err:#}")),
            }
        }
        EngineCommand::LoadRecording(patient_name) => {
            match with_retry(|| source.fetch_recording(&patient_name)) {
                Ok(recording) => EngineEvent::Recording {
                    patient_name,
                    recording,
                },
                Err(err) => {
                    EngineEvent::Error(format!("failed to load recording: {err:#}"))
                }
            }
        }
    }
}

fn with_retry<T>(mut fetch: impl FnMut() -> anyhow::Result<T>) -> anyhow::Result<T> {
    match fetch() {
        Ok(value) => Ok(value),
        Err(first) => {
            log::warn!("fetch failed, retrying once: {first:#}");
            fetch()
        }
    }
}
