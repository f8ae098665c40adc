#![allow(dead_code)]

use http1_box::{ HttpHandler, Signal };

/// Records every callback as `(name, data)`. Consecutive data of the same callback is coalesced,
/// so the record does not depend on how the stream was split.
pub struct Recorder {
    pub events:           Vec<(&'static str, Vec<u8>)>,
    pub headers_complete: Signal
}

impl Recorder {
    pub fn new() -> Recorder {
        Recorder {
            events:           Vec::new(),
            headers_complete: Signal::Continue
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events.iter().map(|&(name, _)| name).collect()
    }

    pub fn data(&self, name: &str) -> Vec<String> {
        self.events
            .iter()
            .filter(|&&(name_, _)| name_ == name)
            .map(|&(_, ref data)| String::from_utf8_lossy(data).into_owned())
            .collect()
    }

    fn push(&mut self, name: &'static str, data: &[u8]) -> Signal {
        if let Some(&mut (name_, ref mut data_)) = self.events.last_mut() {
            if name_ == name && !data.is_empty() {
                data_.extend_from_slice(data);

                return Signal::Continue;
            }
        }

        self.events.push((name, data.to_vec()));

        Signal::Continue
    }
}

impl HttpHandler for Recorder {
    fn on_body(&mut self, data: &[u8]) -> Signal {
        self.push("body", data)
    }

    fn on_chunk_complete(&mut self) -> Signal {
        self.push("chunk_complete", b"")
    }

    fn on_chunk_header(&mut self) -> Signal {
        self.push("chunk_header", b"")
    }

    fn on_header_field(&mut self, field: &[u8]) -> Signal {
        self.push("header_field", field)
    }

    fn on_header_value(&mut self, value: &[u8]) -> Signal {
        self.push("header_value", value)
    }

    fn on_headers_complete(&mut self) -> Signal {
        self.push("headers_complete", b"");

        self.headers_complete
    }

    fn on_message_begin(&mut self) -> Signal {
        self.push("message_begin", b"")
    }

    fn on_message_complete(&mut self) -> Signal {
        self.push("message_complete", b"")
    }

    fn on_status(&mut self, status: &[u8]) -> Signal {
        self.push("status", status)
    }

    fn on_url(&mut self, url: &[u8]) -> Signal {
        self.push("url", url)
    }
}
