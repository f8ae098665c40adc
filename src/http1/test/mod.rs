// +-----------------------------------------------------------------------------------------------+
// | Copyright 2016 Sean Kerr                                                                      |
// |                                                                                               |
// | Licensed under the Apache License, Version 2.0 (the "License");                               |
// | you may not use this file except in compliance with the License.                              |
// | You may obtain a copy of the License at                                                       |
// |                                                                                               |
// |  http://www.apache.org/licenses/LICENSE-2.0                                                   |
// |                                                                                               |
// | Unless required by applicable law or agreed to in writing, software                           |
// | distributed under the License is distributed on an "AS IS" BASIS,                             |
// | WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.                      |
// | See the License for the specific language governing permissions and                           |
// | limitations under the License.                                                                |
// +-----------------------------------------------------------------------------------------------+
// | Author: Sean Kerr <sean@code-box.org>                                                         |
// +-----------------------------------------------------------------------------------------------+

use crate::fsm::Success;
use crate::http1::{ ErrorKind, HttpHandler, Parser, ParserState, ParserType, Signal };

macro_rules! http1_setup {
    ($parser_type:ident) => (
        (Parser::new(ParserType::$parser_type), DebugHandler::new())
    )
}

mod response;

pub fn assert_eos<T: HttpHandler>(
    parser:  &mut Parser,
    handler: &mut T,
    stream:  &[u8],
    state:   ParserState
) {
    match parser.execute(handler, stream) {
        Ok(Success::Eos(length)) => {
            assert_eq!(length, stream.len());
            assert_eq!(state, parser.state());
        },
        result => panic!("assert_eos() Ok(Success::Eos) match failed: {:?}", result)
    }
}

pub fn assert_error<T: HttpHandler>(
    parser:  &mut Parser,
    handler: &mut T,
    stream:  &[u8],
    kind:    ErrorKind,
    offset:  usize
) {
    match parser.execute(handler, stream) {
        Err(error) => {
            assert_eq!(kind, error.kind);
            assert_eq!(offset, error.offset);
            assert_eq!(ParserState::Dead, parser.state());
            assert_eq!(Some(error), parser.error());
        },
        result => panic!("assert_error() Err() match failed: {:?}", result)
    }
}

pub fn assert_paused<T: HttpHandler>(
    parser:  &mut Parser,
    handler: &mut T,
    stream:  &[u8],
    state:   ParserState,
    offset:  usize
) {
    match parser.execute(handler, stream) {
        Ok(Success::Paused(offset_)) => {
            assert_eq!(offset, offset_);
            assert_eq!(state, parser.state());
            assert!(parser.is_paused());
        },
        result => panic!("assert_paused() Ok(Success::Paused) match failed: {:?}", result)
    }
}

pub fn assert_upgrade<T: HttpHandler>(
    parser:  &mut Parser,
    handler: &mut T,
    stream:  &[u8],
    offset:  usize
) {
    match parser.execute(handler, stream) {
        Ok(Success::PausedUpgrade(offset_)) => {
            assert_eq!(offset, offset_);
            assert_eq!(ParserState::Upgrade, parser.state());
            assert!(parser.is_upgrading());
        },
        result => panic!("assert_upgrade() Ok(Success::PausedUpgrade) match failed: {:?}", result)
    }
}

// -------------------------------------------------------------------------------------------------

/// Callbacks of `HttpHandler`.
#[derive(Clone,Copy,Debug,Eq,PartialEq)]
pub enum Callback {
    Body,
    ChunkComplete,
    ChunkHeader,
    HeaderField,
    HeaderValue,
    HeadersComplete,
    MessageBegin,
    MessageComplete,
    Status,
    Url
}

/// Recorded parser events. Consecutive data of the same kind is coalesced.
#[derive(Clone,Debug,Eq,PartialEq)]
pub enum Event {
    Body(String),
    ChunkComplete,
    ChunkHeader,
    HeaderField(String),
    HeaderValue(String),
    HeadersComplete,
    MessageBegin,
    MessageComplete,
    Status(String),
    Url(String)
}

/// `DebugHandler` records every event it receives.
///
/// Signals other than `Signal::Continue` are returned by queueing them in `signals`. Each queued
/// signal is returned once, by the first matching callback.
#[derive(Default)]
pub struct DebugHandler {
    /// Recorded events.
    pub events: Vec<Event>,

    /// Queued callback signals.
    pub signals: Vec<(Callback, Signal)>
}

impl DebugHandler {
    /// Create a new `DebugHandler`.
    pub fn new() -> DebugHandler {
        DebugHandler::default()
    }

    /// Create a new `DebugHandler` that returns `signal` from `callback` once.
    pub fn with_signal(callback: Callback, signal: Signal) -> DebugHandler {
        DebugHandler {
            events:  Vec::new(),
            signals: vec![(callback, signal)]
        }
    }

    /// Retrieve the concatenated body of all messages.
    pub fn body(&self) -> String {
        let mut body = String::new();

        for event in self.events.iter() {
            if let Event::Body(ref data) = *event {
                body.push_str(data);
            }
        }

        body
    }

    /// Count the occurrences of `event`.
    pub fn count(&self, event: &Event) -> usize {
        self.events.iter().filter(|x| *x == event).count()
    }

    /// Retrieve all header and trailer fields with their values.
    pub fn headers(&self) -> Vec<(String, String)> {
        let mut headers = Vec::new();

        for event in self.events.iter() {
            match *event {
                Event::HeaderField(ref field) => {
                    headers.push((field.clone(), String::new()));
                },
                Event::HeaderValue(ref value) => {
                    if let Some(header) = headers.last_mut() {
                        header.1 = value.clone();
                    }
                },
                _ => {}
            }
        }

        headers
    }

    fn data(&mut self, callback: Callback, data: &[u8]) -> Signal {
        let data = String::from_utf8_lossy(data).into_owned();

        let coalesced = match (self.events.last_mut(), callback) {
            (Some(&mut Event::Body(ref mut x)), Callback::Body)
            | (Some(&mut Event::HeaderField(ref mut x)), Callback::HeaderField)
            | (Some(&mut Event::HeaderValue(ref mut x)), Callback::HeaderValue)
            | (Some(&mut Event::Status(ref mut x)), Callback::Status)
            | (Some(&mut Event::Url(ref mut x)), Callback::Url) => {
                x.push_str(&data);

                true
            },
            _ => false
        };

        if !coalesced {
            self.events.push(match callback {
                Callback::Body        => Event::Body(data),
                Callback::HeaderField => Event::HeaderField(data),
                Callback::HeaderValue => Event::HeaderValue(data),
                Callback::Status      => Event::Status(data),
                _                     => Event::Url(data)
            });
        }

        self.signal(callback)
    }

    fn notify(&mut self, callback: Callback, event: Event) -> Signal {
        self.events.push(event);

        self.signal(callback)
    }

    fn signal(&mut self, callback: Callback) -> Signal {
        match self.signals.iter().position(|&(x, _)| x == callback) {
            Some(index) => self.signals.remove(index).1,
            None        => Signal::Continue
        }
    }
}

impl HttpHandler for DebugHandler {
    fn on_body(&mut self, data: &[u8]) -> Signal {
        self.data(Callback::Body, data)
    }

    fn on_chunk_complete(&mut self) -> Signal {
        self.notify(Callback::ChunkComplete, Event::ChunkComplete)
    }

    fn on_chunk_header(&mut self) -> Signal {
        self.notify(Callback::ChunkHeader, Event::ChunkHeader)
    }

    fn on_header_field(&mut self, field: &[u8]) -> Signal {
        self.data(Callback::HeaderField, field)
    }

    fn on_header_value(&mut self, value: &[u8]) -> Signal {
        self.data(Callback::HeaderValue, value)
    }

    fn on_headers_complete(&mut self) -> Signal {
        self.notify(Callback::HeadersComplete, Event::HeadersComplete)
    }

    fn on_message_begin(&mut self) -> Signal {
        self.notify(Callback::MessageBegin, Event::MessageBegin)
    }

    fn on_message_complete(&mut self) -> Signal {
        self.notify(Callback::MessageComplete, Event::MessageComplete)
    }

    fn on_status(&mut self, status: &[u8]) -> Signal {
        self.data(Callback::Status, status)
    }

    fn on_url(&mut self, url: &[u8]) -> Signal {
        self.data(Callback::Url, url)
    }
}
