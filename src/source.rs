use std::collections::HashMap;
use std::fs;
use std::path::Path;
use anyhow::{bail, Context, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Deserialize;
use crate::viewer::DEFAULT_SAMPLE_RATE_HZ;

/// One row of the dashboard table.
#[derive(Clone, Debug, Deserialize)]
pub struct PatientRecord {
    pub patient_name: String,
    pub device: String,
    pub event: String,
    #[serde(default)]
    pub predicted_event: Option<String>,
    #[serde(default)]
    pub is_rejected: String,
    pub event_time: String,
    pub time_in_queue: u32,
    pub technician: String,
}
impl PatientRecord {
    /// The classifier's label wins over the raw event when present.
    pub fn display_event(&self) -> &str {
        self.predicted_event.as_deref().unwrap_or(&self.event)
    }
    pub fn rejected(&self) -> bool {
        self.is_rejected == "1"
    }
}

/// One two-lead sample as it appears on the wire.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct EcgSample {
    pub value1: f32,
    pub value2: f32,
}

/// A complete recording: two equal-length, time-aligned leads at 200 Hz.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Recording {
    pub ecg_data: Vec<EcgSample>,
}
impl Recording {
    pub fn len(&self) -> usize {
        self.ecg_data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.ecg_data.is_empty()
    }
    /// Split the interleaved wire shape into per-lead arrays.
    pub fn leads(&self) -> (Vec<f32>, Vec<f32>) {
        let lead_i = self.ecg_data.iter().map(|s| s.value1).collect();
        let lead_ii = self.ecg_data.iter().map(|s| s.value2).collect();
        (lead_i, lead_ii)
    }
}

/// One page of dashboard rows. Pages are 1-based, as in the upstream API.
#[derive(Clone, Debug)]
pub struct RecordPage {
    pub records: Vec<PatientRecord>,
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
}

/// Something that can serve record pages and per-patient recordings.
/// The HTTP backend lives behind this seam and outside this crate.
pub trait RecordSource: Send {
    fn fetch_page(&mut self, limit: usize, page: usize) -> Result<RecordPage>;
    fn fetch_recording(&mut self, patient_name: &str) -> Result<Recording>;
}

fn page_of(records: &[PatientRecord], limit: usize, page: usize) -> RecordPage {
    let limit = limit.max(1);
    let total_count = records.len();
    let total_pages = total_count.div_ceil(limit).max(1);
    let page = page.clamp(1, total_pages);
    let offset = (page - 1) * limit;
    let slice = records
        .iter()
        .skip(offset)
        .take(limit)
        .cloned()
        .collect();
    RecordPage {
        records: slice,
        page,
        total_pages,
        total_count,
    }
}

/// On-disk archive: the record table plus recordings keyed by patient name.
#[derive(Debug, Deserialize)]
struct RecordArchive {
    records: Vec<PatientRecord>,
    recordings: HashMap<String, Recording>,
}

/// Serves records from a JSON archive file. Useful for exported data sets
/// and as a deterministic stand-in for the HTTP backend.
pub struct JsonFileSource {
    archive: RecordArchive,
}
impl JsonFileSource {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read record archive {}", path.display()))?;
        let archive: RecordArchive = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse record archive {}", path.display()))?;
        log::info!(
            "loaded {} records, {} recordings from {}",
            archive.records.len(),
            archive.recordings.len(),
            path.display()
        );
        Ok(Self { archive })
    }
}
impl RecordSource for JsonFileSource {
    fn fetch_page(&mut self, limit: usize, page: usize) -> Result<RecordPage> {
        Ok(page_of(&self.archive.records, limit, page))
    }
    fn fetch_recording(&mut self, patient_name: &str) -> Result<Recording> {
        match self.archive.recordings.get(patient_name) {
            Some(recording) => Ok(recording.clone()),
            None => bail!("no recording stored for patient '{patient_name}'"),
        }
    }
}

const SIM_DEVICES: [&str; 3] = ["CardioPatch v2", "HolterLink", "TeleECG Mini"];
const SIM_EVENTS: [&str; 4] = ["AFib", "Bradycardia", "Tachycardia", "Normal Sinus"];
const SIM_TECHNICIANS: [&str; 3] = ["R. Alvarez", "M. Chen", "S. Okafor"];
const SIM_RECORDING_SECONDS: usize = 60;

/// Deterministic synthetic patients so the app runs with no data file.
/// Each recording is seeded by the patient index; fetching it twice gives
/// identical samples.
pub struct SimulatedSource {
    records: Vec<PatientRecord>,
}
impl SimulatedSource {
    pub fn new(patient_count: usize) -> Self {
        let records = (0..patient_count)
            .map(|idx| PatientRecord {
                patient_name: format!("Patient {:02}", idx + 1),
                device: SIM_DEVICES[idx % SIM_DEVICES.len()].to_owned(),
                event: SIM_EVENTS[idx % SIM_EVENTS.len()].to_owned(),
                predicted_event: None,
                is_rejected: if idx % 7 == 0 { "1" } else { "0" }.to_owned(),
                event_time: format!("2024-03-{:02} 08:{:02}", idx % 28 + 1, idx % 60),
                time_in_queue: (idx % 9) as u32,
                technician: SIM_TECHNICIANS[idx % SIM_TECHNICIANS.len()].to_owned(),
            })
            .collect();
        Self { records }
    }
    fn patient_seed(&self, patient_name: &str) -> Option<u64> {
        self.records
            .iter()
            .position(|r| r.patient_name == patient_name)
            .map(|idx| 0xECB0 + idx as u64)
    }
}
impl RecordSource for SimulatedSource {
    fn fetch_page(&mut self, limit: usize, page: usize) -> Result<RecordPage> {
        Ok(page_of(&self.records, limit, page))
    }
    fn fetch_recording(&mut self, patient_name: &str) -> Result<Recording> {
        let Some(seed) = self.patient_seed(patient_name) else {
            bail!("unknown patient '{patient_name}'");
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let beat_hz = rng.gen_range(1.0..1.4f32);
        let total = SIM_RECORDING_SECONDS * DEFAULT_SAMPLE_RATE_HZ as usize;
        let ecg_data = (0..total)
            .map(|i| {
                let t = i as f32 / DEFAULT_SAMPLE_RATE_HZ;
                let v1 = synth_lead(t, beat_hz, 0.0, &mut rng);
                let v2 = synth_lead(t, beat_hz, 0.25, &mut rng);
                EcgSample {
                    value1: v1,
                    value2: v2,
                }
            })
            .collect();
        Ok(Recording { ecg_data })
    }
}

/// Crude ECG shape around the 1500 ADC baseline used by the telemetry
/// devices: a narrow R spike per beat plus slow P/T undulation and noise.
fn synth_lead(t: f32, beat_hz: f32, phase: f32, rng: &mut StdRng) -> f32 {
    let beat_pos = (t * beat_hz + phase).fract();
    let r_wave = if beat_pos < 0.05 {
        let x = beat_pos / 0.05;
        (x * std::f32::consts::PI).sin() * 80.0
    } else {
        0.0
    };
    let undulation = (2.0 * std::f32::consts::PI * beat_hz * t).sin() * 12.0;
    let noise = rng.gen_range(-3.0..3.0f32);
    1500.0 + r_wave + undulation + noise
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn pagination_matches_the_upstream_shape() {
        let mut source = SimulatedSource::new(23);
        let page = source.fetch_page(10, 1).unwrap();
        assert_eq!(page.records.len(), 10);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_count, 23);
        let last = source.fetch_page(10, 3).unwrap();
        assert_eq!(last.records.len(), 3);
        // Out-of-range pages clamp instead of erroring.
        let clamped = source.fetch_page(10, 99).unwrap();
        assert_eq!(clamped.page, 3);
    }
    #[test]
    fn simulated_recordings_are_deterministic() {
        let mut a = SimulatedSource::new(5);
        let mut b = SimulatedSource::new(5);
        let ra = a.fetch_recording("Patient 03").unwrap();
        let rb = b.fetch_recording("Patient 03").unwrap();
        assert_eq!(ra.len(), 60 * 200);
        assert_eq!(ra.ecg_data[100].value1, rb.ecg_data[100].value1);
        assert!(a.fetch_recording("Patient 99").is_err());
    }
    #[test]
    fn simulated_samples_stay_in_the_display_band() {
        let mut source = SimulatedSource::new(1);
        let recording = source.fetch_recording("Patient 01").unwrap();
        for sample in &recording.ecg_data {
            assert!(sample.value1 > 1400.0 && sample.value1 < 1600.0);
            assert!(sample.value2 > 1400.0 && sample.value2 < 1600.0);
        }
    }
    #[test]
    fn decodes_the_wire_shape() {
        let text = r#"{
            "records": [{
                "patient_name": "Jane Roe",
                "device": "HolterLink",
                "event": "AFib",
                "predicted_event": "Tachycardia",
                "is_rejected": "1",
                "event_time": "2024-01-05 14:02",
                "time_in_queue": 3,
                "technician": "M. Chen"
            }],
            "recordings": {
                "Jane Roe": { "ecg_data": [{"value1": 1500.5, "value2": 1498.0}] }
            }
        }"#;
        let archive: RecordArchive = serde_json::from_str(text).unwrap();
        let record = &archive.records[0];
        assert_eq!(record.display_event(), "Tachycardia");
        assert!(record.rejected());
        let (lead_i, lead_ii) = archive.recordings["Jane Roe"].leads();
        assert_eq!(lead_i, vec![1500.5]);
        assert_eq!(lead_ii, vec![1498.0]);
    }
}
