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

//! Recognition of the header fields that decide message framing.

use crate::http1::flags::{ Flags, Lenient };
use crate::http1::parser_error::ErrorKind;

/// Longest header name or value token that is remembered. Longer tokens never match.
const TOKEN_CAPACITY: usize = 24;

/// Error kind and reason of a framing header violation.
pub type FieldError = (ErrorKind, &'static str);

/// Header field kinds.
#[derive(Clone,Copy,Debug,Eq,PartialEq)]
pub enum HeaderKind {
    /// No framing meaning.
    General,

    /// `Connection` or `Proxy-Connection`.
    Connection,

    /// `Content-Length`.
    ContentLength,

    /// `Transfer-Encoding`.
    TransferEncoding,

    /// `Upgrade`.
    Upgrade
}

/// Classifies header names, and interprets the values of framing headers.
///
/// Names and values may arrive a byte at a time across any number of buffers, so everything is
/// accumulated here instead of being sliced from the stream.
pub struct FieldState {
    /// Digits were found in a `Content-Length` value.
    digits: bool,

    /// Current header kind.
    kind: HeaderKind,

    /// Accumulated `Content-Length` value.
    number: u64,

    /// The current token outgrew `TOKEN_CAPACITY`, or was interrupted by whitespace.
    overflow: bool,

    /// Skipping transfer coding parameters.
    parameters: bool,

    /// Whitespace follows the current token.
    space: bool,

    /// Lower-cased token bytes.
    token: [u8; TOKEN_CAPACITY],

    /// Token length.
    token_length: usize
}

impl FieldState {
    /// Create a new `FieldState`.
    pub fn new() -> FieldState {
        FieldState {
            digits:       false,
            kind:         HeaderKind::General,
            number:       0,
            overflow:     false,
            parameters:   false,
            space:        false,
            token:        [0; TOKEN_CAPACITY],
            token_length: 0
        }
    }

    /// Retrieve the current header kind.
    pub fn kind(&self) -> HeaderKind {
        self.kind
    }

    /// Prepare for a new header name.
    pub fn begin_field(&mut self) {
        self.kind = HeaderKind::General;

        self.clear_token();
    }

    /// Append a header name byte.
    #[inline]
    pub fn field_byte(&mut self, byte: u8) {
        self.push(byte);
    }

    /// Classify the collected header name, and prepare for its value.
    ///
    /// Trailer fields never carry framing meaning.
    pub fn end_field(&mut self, trailing: bool, flags: &mut Flags) -> HeaderKind {
        self.kind = if trailing {
            HeaderKind::General
        } else if self.token_is(b"content-length") {
            HeaderKind::ContentLength
        } else if self.token_is(b"transfer-encoding") {
            flags.insert(Flags::TRANSFER_ENCODING);

            HeaderKind::TransferEncoding
        } else if self.token_is(b"connection") || self.token_is(b"proxy-connection") {
            HeaderKind::Connection
        } else if self.token_is(b"upgrade") {
            flags.insert(Flags::UPGRADE);

            HeaderKind::Upgrade
        } else {
            HeaderKind::General
        };

        self.clear_token();

        self.digits     = false;
        self.number     = 0;
        self.parameters = false;

        self.kind
    }

    /// Interpret a header value byte. Leading whitespace has already been stripped.
    #[inline]
    pub fn value_byte(&mut self, byte: u8, flags: &mut Flags) -> Result<(), FieldError> {
        match self.kind {
            HeaderKind::ContentLength => {
                if is_digit!(byte) {
                    if self.space {
                        return Err((ErrorKind::InvalidContentLength,
                                    "Invalid character in Content-Length"));
                    }

                    self.number = self.number
                                      .checked_mul(10)
                                      .and_then(|number| number.checked_add((byte - b'0') as u64))
                                      .ok_or((ErrorKind::InvalidContentLength,
                                              "Content-Length overflow"))?;

                    self.digits = true;
                } else if is_space!(byte) {
                    self.space = true;
                } else {
                    return Err((ErrorKind::InvalidContentLength,
                                "Invalid character in Content-Length"));
                }
            },
            HeaderKind::Connection | HeaderKind::TransferEncoding => {
                if byte == b',' {
                    self.end_token(flags);

                    self.parameters = false;
                } else if is_space!(byte) {
                    if self.token_length > 0 {
                        self.space = true;
                    }
                } else if byte == b';' && self.kind == HeaderKind::TransferEncoding {
                    self.parameters = true;
                } else if !self.parameters {
                    if self.space {
                        // whitespace within a token
                        self.overflow = true;
                    }

                    self.push(byte);
                }
            },
            HeaderKind::General | HeaderKind::Upgrade => {
            }
        }

        Ok(())
    }

    /// Finish interpreting a header value.
    pub fn end_value(&mut self, flags: &mut Flags, content_length: &mut Option<u64>,
                     lenient: Lenient) -> Result<(), FieldError> {
        match self.kind {
            HeaderKind::ContentLength => {
                if !self.digits {
                    return Err((ErrorKind::InvalidContentLength, "Empty Content-Length"));
                }

                if flags.contains(Flags::CONTENT_LENGTH) {
                    if !lenient.contains(Lenient::DUPLICATE_LENGTH)
                    || *content_length != Some(self.number) {
                        return Err((ErrorKind::UnexpectedContentLength,
                                    "Duplicate Content-Length"));
                    }
                }

                flags.insert(Flags::CONTENT_LENGTH);

                *content_length = Some(self.number);
                self.space      = false;
            },
            HeaderKind::Connection | HeaderKind::TransferEncoding => {
                self.end_token(flags);
            },
            HeaderKind::General | HeaderKind::Upgrade => {
            }
        }

        Ok(())
    }

    // ---------------------------------------------------------------------------------------------

    fn clear_token(&mut self) {
        self.overflow     = false;
        self.space        = false;
        self.token_length = 0;
    }

    fn end_token(&mut self, flags: &mut Flags) {
        if self.token_length == 0 && !self.overflow {
            // empty list element
            return;
        }

        if self.kind == HeaderKind::TransferEncoding {
            // only the final coding decides
            let chunked = self.token_is(b"chunked");

            flags.set(Flags::CHUNKED, chunked);
        } else if self.token_is(b"close") {
            flags.insert(Flags::CONNECTION_CLOSE);
        } else if self.token_is(b"keep-alive") {
            flags.insert(Flags::CONNECTION_KEEP_ALIVE);
        } else if self.token_is(b"upgrade") {
            flags.insert(Flags::CONNECTION_UPGRADE);
        }

        self.clear_token();
    }

    #[inline]
    fn push(&mut self, byte: u8) {
        if self.token_length == TOKEN_CAPACITY {
            self.overflow = true;
        } else {
            self.token[self.token_length] = byte.to_ascii_lowercase();
            self.token_length            += 1;
        }
    }

    fn token_is(&self, name: &[u8]) -> bool {
        !self.overflow && &self.token[..self.token_length] == name
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn field(state: &mut FieldState, flags: &mut Flags, name: &[u8]) -> HeaderKind {
        state.begin_field();

        for byte in name {
            state.field_byte(*byte);
        }

        state.end_field(false, flags)
    }

    fn value(state: &mut FieldState, flags: &mut Flags, value: &[u8])
    -> Result<Option<u64>, FieldError> {
        let mut content_length = None;

        for byte in value {
            state.value_byte(*byte, flags)?;
        }

        state.end_value(flags, &mut content_length, Lenient::empty())?;

        Ok(content_length)
    }

    #[test]
    fn classify() {
        let mut flags = Flags::empty();
        let mut state = FieldState::new();

        assert_eq!(field(&mut state, &mut flags, b"Content-LENGTH"), HeaderKind::ContentLength);
        assert_eq!(field(&mut state, &mut flags, b"proxy-connection"), HeaderKind::Connection);
        assert_eq!(field(&mut state, &mut flags, b"Host"), HeaderKind::General);
        assert_eq!(
            field(&mut state, &mut flags, b"X-Very-Long-Header-Name-That-Overflows"),
            HeaderKind::General
        );
        assert!(flags.is_empty());

        assert_eq!(field(&mut state, &mut flags, b"Upgrade"), HeaderKind::Upgrade);
        assert!(flags.contains(Flags::UPGRADE));

        state.begin_field();
        state.field_byte(b'U');
        state.field_byte(b'p');
        state.field_byte(b'g');
        state.field_byte(b'r');
        state.field_byte(b'a');
        state.field_byte(b'd');
        state.field_byte(b'e');

        assert_eq!(state.end_field(true, &mut flags), HeaderKind::General);
    }

    #[test]
    fn content_length() {
        let mut flags = Flags::empty();
        let mut state = FieldState::new();

        field(&mut state, &mut flags, b"content-length");

        assert_eq!(value(&mut state, &mut flags, b"42  "), Ok(Some(42)));
        assert!(flags.contains(Flags::CONTENT_LENGTH));

        let mut flags = Flags::empty();

        field(&mut state, &mut flags, b"content-length");

        assert_eq!(
            value(&mut state, &mut flags, b"4 2"),
            Err((ErrorKind::InvalidContentLength, "Invalid character in Content-Length"))
        );

        field(&mut state, &mut flags, b"content-length");

        assert_eq!(
            value(&mut state, &mut flags, b"18446744073709551616"),
            Err((ErrorKind::InvalidContentLength, "Content-Length overflow"))
        );
    }

    #[test]
    fn transfer_encoding() {
        let mut flags = Flags::empty();
        let mut state = FieldState::new();

        field(&mut state, &mut flags, b"Transfer-Encoding");
        value(&mut state, &mut flags, b"gzip, Chunked").unwrap();

        assert!(flags.contains(Flags::TRANSFER_ENCODING | Flags::CHUNKED));

        field(&mut state, &mut flags, b"Transfer-Encoding");
        value(&mut state, &mut flags, b"chunked;q=1 , gzip").unwrap();

        assert!(!flags.contains(Flags::CHUNKED));

        field(&mut state, &mut flags, b"Transfer-Encoding");
        value(&mut state, &mut flags, b"chun ked").unwrap();

        assert!(!flags.contains(Flags::CHUNKED));
    }

    #[test]
    fn connection() {
        let mut flags = Flags::empty();
        let mut state = FieldState::new();

        field(&mut state, &mut flags, b"Connection");
        value(&mut state, &mut flags, b"Keep-Alive, , Upgrade").unwrap();

        assert!(flags.contains(Flags::CONNECTION_KEEP_ALIVE | Flags::CONNECTION_UPGRADE));
        assert!(!flags.contains(Flags::CONNECTION_CLOSE));
    }
}
