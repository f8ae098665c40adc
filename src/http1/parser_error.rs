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

use std::fmt;

use thiserror::Error;

/// Strictness violation error code.
pub const E_STRICT: u8 = 2;

/// Missing LF error code.
pub const E_LF_EXPECTED: u8 = 3;

/// Unexpected content length error code.
pub const E_UNEXPECTED_CONTENT_LENGTH: u8 = 4;

/// Closed connection error code.
pub const E_CLOSED_CONNECTION: u8 = 5;

/// Invalid method error code.
pub const E_INVALID_METHOD: u8 = 6;

/// Invalid URL error code.
pub const E_INVALID_URL: u8 = 7;

/// Invalid constant error code.
pub const E_INVALID_CONSTANT: u8 = 8;

/// Invalid version error code.
pub const E_INVALID_VERSION: u8 = 9;

/// Invalid header token error code.
pub const E_INVALID_HEADER_TOKEN: u8 = 10;

/// Invalid content length error code.
pub const E_INVALID_CONTENT_LENGTH: u8 = 11;

/// Invalid chunk size error code.
pub const E_INVALID_CHUNK_SIZE: u8 = 12;

/// Invalid status error code.
pub const E_INVALID_STATUS: u8 = 13;

/// Invalid EOF state error code.
pub const E_INVALID_EOF_STATE: u8 = 14;

/// Invalid transfer encoding error code.
pub const E_INVALID_TRANSFER_ENCODING: u8 = 15;

/// User callback error code.
pub const E_USER: u8 = 24;

/// Missing CR error code.
pub const E_CR_EXPECTED: u8 = 25;

/// Parser error kinds.
///
/// Discriminants are stable and may be logged or sent across process boundaries.
#[derive(Clone,Copy,Debug,Eq,Hash,PartialEq)]
#[repr(u8)]
pub enum ErrorKind {
    /// Grammar conformant input that violates a strictness rule.
    Strict = E_STRICT,

    /// A CR was not followed by LF.
    LfExpected = E_LF_EXPECTED,

    /// Content-Length was repeated, or sent alongside Transfer-Encoding.
    UnexpectedContentLength = E_UNEXPECTED_CONTENT_LENGTH,

    /// Data was received after a connection closing message.
    ClosedConnection = E_CLOSED_CONNECTION,

    /// Invalid request method.
    InvalidMethod = E_INVALID_METHOD,

    /// Invalid request target.
    InvalidUrl = E_INVALID_URL,

    /// The `HTTP/` protocol constant did not match.
    InvalidConstant = E_INVALID_CONSTANT,

    /// Invalid HTTP version.
    InvalidVersion = E_INVALID_VERSION,

    /// Invalid header field name or value.
    InvalidHeaderToken = E_INVALID_HEADER_TOKEN,

    /// Invalid Content-Length value.
    InvalidContentLength = E_INVALID_CONTENT_LENGTH,

    /// Invalid chunk size.
    InvalidChunkSize = E_INVALID_CHUNK_SIZE,

    /// Invalid response status.
    InvalidStatus = E_INVALID_STATUS,

    /// Input ended while a message was incomplete.
    InvalidEofState = E_INVALID_EOF_STATE,

    /// Request Transfer-Encoding did not end with `chunked`.
    InvalidTransferEncoding = E_INVALID_TRANSFER_ENCODING,

    /// A callback returned [`Signal::Abort`](enum.Signal.html#variant.Abort).
    User = E_USER,

    /// A line ended with LF where CRLF is required.
    CrExpected = E_CR_EXPECTED
}

impl ErrorKind {
    /// Create a new `ErrorKind` from a `u8`.
    pub fn from_u8(byte: u8) -> Option<ErrorKind> {
        Some(match byte {
            E_STRICT                    => ErrorKind::Strict,
            E_LF_EXPECTED               => ErrorKind::LfExpected,
            E_UNEXPECTED_CONTENT_LENGTH => ErrorKind::UnexpectedContentLength,
            E_CLOSED_CONNECTION         => ErrorKind::ClosedConnection,
            E_INVALID_METHOD            => ErrorKind::InvalidMethod,
            E_INVALID_URL               => ErrorKind::InvalidUrl,
            E_INVALID_CONSTANT          => ErrorKind::InvalidConstant,
            E_INVALID_VERSION           => ErrorKind::InvalidVersion,
            E_INVALID_HEADER_TOKEN      => ErrorKind::InvalidHeaderToken,
            E_INVALID_CONTENT_LENGTH    => ErrorKind::InvalidContentLength,
            E_INVALID_CHUNK_SIZE        => ErrorKind::InvalidChunkSize,
            E_INVALID_STATUS            => ErrorKind::InvalidStatus,
            E_INVALID_EOF_STATE         => ErrorKind::InvalidEofState,
            E_INVALID_TRANSFER_ENCODING => ErrorKind::InvalidTransferEncoding,
            E_USER                      => ErrorKind::User,
            E_CR_EXPECTED               => ErrorKind::CrExpected,
            _                           => return None
        })
    }

    /// Convert this error kind to its byte value.
    pub fn as_byte(&self) -> u8 {
        *self as u8
    }

    /// Retrieve the stable upper-case name of this error kind.
    pub fn name(&self) -> &'static str {
        match *self {
            ErrorKind::Strict                  => "STRICT",
            ErrorKind::LfExpected              => "LF_EXPECTED",
            ErrorKind::UnexpectedContentLength => "UNEXPECTED_CONTENT_LENGTH",
            ErrorKind::ClosedConnection        => "CLOSED_CONNECTION",
            ErrorKind::InvalidMethod           => "INVALID_METHOD",
            ErrorKind::InvalidUrl              => "INVALID_URL",
            ErrorKind::InvalidConstant         => "INVALID_CONSTANT",
            ErrorKind::InvalidVersion          => "INVALID_VERSION",
            ErrorKind::InvalidHeaderToken      => "INVALID_HEADER_TOKEN",
            ErrorKind::InvalidContentLength    => "INVALID_CONTENT_LENGTH",
            ErrorKind::InvalidChunkSize        => "INVALID_CHUNK_SIZE",
            ErrorKind::InvalidStatus           => "INVALID_STATUS",
            ErrorKind::InvalidEofState         => "INVALID_EOF_STATE",
            ErrorKind::InvalidTransferEncoding => "INVALID_TRANSFER_ENCODING",
            ErrorKind::User                    => "USER",
            ErrorKind::CrExpected              => "CR_EXPECTED"
        }
    }

    /// Retrieve the parse stage this error kind belongs to.
    pub fn stage(&self) -> ErrorStage {
        match *self {
            ErrorKind::InvalidMethod
            | ErrorKind::InvalidUrl
            | ErrorKind::InvalidConstant
            | ErrorKind::InvalidVersion
            | ErrorKind::InvalidStatus => ErrorStage::StartLine,

            ErrorKind::InvalidHeaderToken => ErrorStage::Header,

            ErrorKind::UnexpectedContentLength
            | ErrorKind::InvalidContentLength
            | ErrorKind::InvalidTransferEncoding => ErrorStage::Framing,

            ErrorKind::InvalidChunkSize => ErrorStage::Chunk,

            ErrorKind::ClosedConnection
            | ErrorKind::InvalidEofState => ErrorStage::AfterMessage,

            ErrorKind::Strict
            | ErrorKind::LfExpected
            | ErrorKind::CrExpected => ErrorStage::Strictness,

            ErrorKind::User => ErrorStage::Consumer
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

// -------------------------------------------------------------------------------------------------

/// Parse stages errors are grouped by.
#[derive(Clone,Copy,Debug,Eq,Hash,PartialEq)]
pub enum ErrorStage {
    /// Request line or status line.
    StartLine,

    /// Header field syntax.
    Header,

    /// Content-Length and Transfer-Encoding semantics.
    Framing,

    /// Chunked transfer coding.
    Chunk,

    /// Input after the message ended, or input ending too early.
    AfterMessage,

    /// Line terminators and other strictness rules relaxed by lenient flags.
    Strictness,

    /// A callback aborted parsing.
    Consumer
}

// -------------------------------------------------------------------------------------------------

/// Parser error.
#[derive(Clone,Copy,Debug,Eq,Error,PartialEq)]
#[error("{kind}: {reason} at offset {offset}")]
pub struct ParserError {
    /// Error kind.
    pub kind: ErrorKind,

    /// Human readable reason.
    pub reason: &'static str,

    /// Offset within the failing buffer where the error was detected.
    pub offset: usize
}

impl ParserError {
    /// Create a new `ParserError`.
    pub fn new(kind: ErrorKind, reason: &'static str, offset: usize) -> ParserError {
        ParserError {
            kind:   kind,
            reason: reason,
            offset: offset
        }
    }

    /// Retrieve the parse stage this error was detected in.
    pub fn stage(&self) -> ErrorStage {
        self.kind.stage()
    }
}
