// src/types.rs
use crate::source::{RecordPage, Recording};

/// Commands the GUI sends to the background fetch engine.
#[derive(Clone, Debug)]
pub enum EngineCommand {
    LoadPage { limit: usize, page: usize },
    LoadRecording(String),
}

/// Events the fetch engine sends back to the GUI.
#[derive(Clone, Debug)]
pub enum EngineEvent {
    Page(RecordPage),
    Recording {
        patient_name: String,
        recording: Recording,
    },
    Error(String),
}
