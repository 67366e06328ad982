//! Synthetic OPUS file builder shared by the integration tests.
#![allow(dead_code)]

use bruker_opus_rs::blocks::{DIRECTORY_RECORD_SIZE, DIRECTORY_START, HEADER_LEN};

/// Builds a file by appending block bodies after the header and writing a
/// directory record for each one.
pub struct OpusBuilder {
    data: Vec<u8>,
    records: usize,
}

impl OpusBuilder {
    pub fn new() -> Self {
        Self {
            data: vec![0u8; HEADER_LEN],
            records: 0,
        }
    }

    /// Append a body and its directory record. The body is zero padded to a
    /// whole number of 4-byte chunks.
    pub fn block(mut self, data_kind: u8, channel_kind: u8, text_kind: u8, body: &[u8]) -> Self {
        let offset = self.data.len();
        let mut body = body.to_vec();
        body.resize(body.len().div_ceil(4) * 4, 0);
        let chunks = (body.len() / 4) as u32;
        self.data.extend_from_slice(&body);
        self.raw_record(
            [data_kind, channel_kind, text_kind, 0],
            chunks,
            offset as i32,
        )
    }

    /// Append bytes that no directory record points at.
    pub fn padding(mut self, len: usize) -> Self {
        self.data.resize(self.data.len() + len, 0);
        self
    }

    /// Write a directory record without appending a body.
    pub fn raw_record(mut self, kinds: [u8; 4], chunks: u32, offset: i32) -> Self {
        let at = DIRECTORY_START + self.records * DIRECTORY_RECORD_SIZE;
        self.data[at..at + 4].copy_from_slice(&kinds);
        self.data[at + 4..at + 8].copy_from_slice(&chunks.to_le_bytes());
        self.data[at + 8..at + 12].copy_from_slice(&offset.to_le_bytes());
        self.records += 1;
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.data
    }
}

pub fn series_body(samples: &[f32]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

pub struct ParamBody(Vec<u8>);

impl ParamBody {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    fn record(mut self, tag: &str, code: u16, payload: &[u8]) -> Self {
        let mut tag_field = [0u8; 4];
        tag_field[..tag.len()].copy_from_slice(tag.as_bytes());
        let mut payload = payload.to_vec();
        payload.resize(payload.len().div_ceil(2) * 2, 0);
        self.0.extend_from_slice(&tag_field);
        self.0.extend_from_slice(&code.to_le_bytes());
        self.0
            .extend_from_slice(&((payload.len() / 2) as u16).to_le_bytes());
        self.0.extend_from_slice(&payload);
        self
    }

    pub fn int(self, tag: &str, value: i32) -> Self {
        self.record(tag, 0, &value.to_le_bytes())
    }

    pub fn float(self, tag: &str, value: f64) -> Self {
        self.record(tag, 1, &value.to_le_bytes())
    }

    pub fn string(self, tag: &str, value: &str) -> Self {
        let mut payload = value.as_bytes().to_vec();
        payload.push(0);
        self.record(tag, 2, &payload)
    }

    pub fn raw(self, tag: &str, code: u16, payload: &[u8]) -> Self {
        self.record(tag, code, payload)
    }

    pub fn end(self) -> Vec<u8> {
        self.record("END", 0, &[]).0
    }
}
