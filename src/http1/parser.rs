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

use crate::byte::{ is_field_content, is_token, is_url };
use crate::fsm::{ ParserValue, Success };
use crate::http1::control::{ Control, ControlError };
use crate::http1::flags::{ Flags, Lenient };
use crate::http1::header::{ FieldState, HeaderKind };
use crate::http1::http_handler::{ HttpHandler, Signal };
use crate::http1::method::{ Method, METHOD_MAX_LENGTH };
use crate::http1::parser_error::{ ErrorKind, ParserError };
use crate::http1::parser_state::ParserState;
use crate::http1::parser_type::ParserType;

use byte_slice::ByteStream;
use log::{ debug, trace };
use std::cmp;

// -------------------------------------------------------------------------------------------------
// MACROS
// -------------------------------------------------------------------------------------------------

/// Accept a bare LF as a line ending and execute `$exec` when lenient line endings are enabled.
/// Otherwise exit with `ErrorKind::CrExpected`.
macro_rules! bare_lf {
    ($parser:expr, $context:expr, $reason:expr, $exec:expr) => ({
        if $parser.lenient.contains(Lenient::LINE_ENDINGS) {
            $exec
        } else {
            exit_error!($context, CrExpected, $reason);
        }
    });
}

/// Indicates that the unprocessed stream begins with `$bytes`.
macro_rules! starts_with {
    ($context:expr, $bytes:expr) => (
        $context.stream[$context.stream_index..].starts_with($bytes)
    );
}

// -------------------------------------------------------------------------------------------------

/// Maximum length of a whitespace run within a header value.
///
/// Longer runs fail the parser with `ErrorKind::InvalidHeaderToken`.
pub const WHITESPACE_MAX_LENGTH: usize = 256;

// -------------------------------------------------------------------------------------------------

/// HTTP/1.x parser.
///
/// The parser is push oriented: bytes are supplied with [`execute()`](#method.execute) as they
/// arrive, and events are delivered to an [`HttpHandler`](trait.HttpHandler.html). Messages may
/// be split across any number of calls, and several pipelined messages may share one call.
pub struct Parser {
    /// Total byte count processed.
    byte_count: usize,

    /// Declared content length.
    content_length: Option<u64>,

    /// Control state.
    control: Control,

    /// Error that failed the parser.
    error: Option<ParserError>,

    /// Header name classification and framing header values.
    field: FieldState,

    /// Per-message framing flags.
    flags: Flags,

    /// HTTP major version.
    http_major: Option<u8>,

    /// HTTP minor version.
    http_minor: Option<u8>,

    /// Position within the protocol constant or the status code.
    index: u8,

    /// Remaining body or chunk length. Accumulates the status code during the status line.
    length: u64,

    /// Relaxed strictness checks.
    lenient: Lenient,

    /// Request method.
    method: Option<Method>,

    /// Method bytes collected so far.
    method_buffer: [u8; METHOD_MAX_LENGTH],

    /// Method byte count.
    method_length: usize,

    /// Parser type.
    parser_type: ParserType,

    /// Current state.
    state: ParserState,

    /// Response status code.
    status_code: Option<u16>,

    /// Message switches protocols once complete.
    upgrade: bool,

    /// Header value whitespace held back at the end of a stream. It is supplied to
    /// `on_header_value()` only when more value follows it.
    whitespace: [u8; WHITESPACE_MAX_LENGTH],

    /// Held back whitespace byte count.
    whitespace_length: usize
}

impl Parser {
    /// Create a new `Parser` of `parser_type`.
    pub fn new(parser_type: ParserType) -> Parser {
        Parser {
            byte_count:     0,
            content_length: None,
            control:        Control::Running,
            error:          None,
            field:          FieldState::new(),
            flags:          Flags::empty(),
            http_major:     None,
            http_minor:     None,
            index:          0,
            length:         0,
            lenient:        Lenient::empty(),
            method:         None,
            method_buffer:  [0; METHOD_MAX_LENGTH],
            method_length:  0,
            parser_type:    parser_type,
            state:          ParserState::MessageStart,
            status_code:    None,
            upgrade:        false,
            whitespace:        [0; WHITESPACE_MAX_LENGTH],
            whitespace_length: 0
        }
    }

    /// Create a new request `Parser`.
    pub fn request() -> Parser {
        Parser::new(ParserType::Request)
    }

    /// Create a new response `Parser`.
    pub fn response() -> Parser {
        Parser::new(ParserType::Response)
    }

    /// Retrieve the total byte count processed since the instantiation, or the most recent reset,
    /// of `Parser`.
    ///
    /// The byte count is updated when `execute()` completes. For precise accuracy, retrieve it
    /// outside of all callbacks.
    pub fn byte_count(&self) -> usize {
        self.byte_count
    }

    /// Retrieve the declared content length of the current message.
    ///
    /// This is `None` when no `Content-Length` header was found, which differs from
    /// `Some(0)`.
    pub fn content_length(&self) -> Option<u64> {
        if self.flags.contains(Flags::CONTENT_LENGTH) {
            self.content_length
        } else {
            None
        }
    }

    /// Retrieve the control state.
    pub fn control(&self) -> Control {
        self.control
    }

    /// Retrieve the error that failed the parser.
    pub fn error(&self) -> Option<ParserError> {
        self.error
    }

    /// Parse `stream`, delivering events to `handler`.
    ///
    /// # Returns
    ///
    /// **`Ok(Success::Eos(length))`**
    ///
    /// All of `stream` was processed. Supply more data with another call.
    ///
    /// **`Ok(Success::Paused(offset))`**
    ///
    /// Parsing paused at `offset`. Call [`resume()`](#method.resume), then supply
    /// `&stream[offset..]` again.
    ///
    /// **`Ok(Success::PausedUpgrade(offset))`**
    ///
    /// The message switched protocols. `&stream[offset..]` belongs to the new protocol.
    ///
    /// **`Err(ParserError)`**
    ///
    /// The stream is invalid, or a callback aborted. The parser refuses further input until
    /// [`reset()`](#method.reset).
    pub fn execute<T: HttpHandler>(&mut self, handler: &mut T, stream: &[u8])
    -> Result<Success, ParserError> {
        match self.control {
            Control::Running => {
            },
            Control::Paused => {
                return Ok(Success::Paused(0));
            },
            Control::PausedUpgrade => {
                return Ok(Success::PausedUpgrade(0));
            },
            Control::Failed => {
                return Err(self.failure());
            }
        }

        let mut context = ByteStream::new(stream);

        loop {
            match self.dispatch(handler, &mut context) {
                Ok(ParserValue::Continue) => {
                },
                Ok(ParserValue::Exit(success)) => {
                    self.byte_count += success.offset();

                    match success {
                        Success::Paused(offset) => {
                            debug!("{:?} parser paused at offset {}", self.parser_type, offset);

                            self.control = Control::Paused;
                        },
                        Success::PausedUpgrade(offset) => {
                            debug!("{:?} parser upgraded at offset {}", self.parser_type, offset);

                            self.control = Control::PausedUpgrade;
                        },
                        Success::Eos(_) => {
                        }
                    }

                    return Ok(success);
                },
                Err(error) => {
                    self.byte_count += context.stream_index;

                    return Err(self.fail(error));
                }
            }
        }
    }

    /// Signal the end of input.
    ///
    /// Completes a body that is read until the connection closes, or a message whose framing
    /// has been read in full, executing `on_message_complete()`. Succeeds without effect when
    /// no message is in flight, or when the parser is paused.
    ///
    /// # Errors
    ///
    /// `ErrorKind::InvalidEofState` when a message is incomplete, which fails the parser.
    pub fn finish<T: HttpHandler>(&mut self, handler: &mut T) -> Result<(), ParserError> {
        match self.control {
            Control::Failed => {
                return Err(self.failure());
            },
            Control::Paused | Control::PausedUpgrade => {
                debug!("{:?} parser finished while {}", self.parser_type, self.control);

                return Ok(());
            },
            Control::Running => {
            }
        }

        match self.state {
            ParserState::MessageStart | ParserState::Closed | ParserState::Upgrade => {
                debug!("{:?} parser finished at a message boundary", self.parser_type);

                Ok(())
            },
            ParserState::BodyIdentityEof | ParserState::MessageComplete => {
                debug!("{:?} parser finished a message at EOF", self.parser_type);

                self.state = ParserState::Closed;

                if let Signal::Abort = handler.on_message_complete() {
                    return Err(self.fail(ParserError::new(
                        ErrorKind::User,
                        "`on_message_complete` callback error",
                        0
                    )));
                }

                Ok(())
            },
            _ => {
                Err(self.fail(ParserError::new(ErrorKind::InvalidEofState, "Invalid EOF state", 0)))
            }
        }
    }

    /// Retrieve the HTTP major version, once it has been parsed.
    pub fn http_major(&self) -> Option<u8> {
        self.http_major
    }

    /// Retrieve the HTTP minor version, once it has been parsed.
    pub fn http_minor(&self) -> Option<u8> {
        self.http_minor
    }

    /// Indicates that the current message uses chunked transfer coding.
    pub fn is_chunked(&self) -> bool {
        self.flags.contains(Flags::CHUNKED)
    }

    /// Indicates that the parser is paused.
    pub fn is_paused(&self) -> bool {
        self.control == Control::Paused
    }

    /// Indicates that the parser is paused because the message switched protocols.
    pub fn is_upgrading(&self) -> bool {
        self.control == Control::PausedUpgrade
    }

    /// Indicates that any strictness check is relaxed.
    pub fn lenient(&self) -> bool {
        !self.lenient.is_empty()
    }

    /// Retrieve the relaxed strictness checks.
    pub fn lenient_flags(&self) -> Lenient {
        self.lenient
    }

    /// Indicates that the body of the current message ends when the connection closes.
    ///
    /// This is never the case for requests, or for responses that cannot carry a body.
    pub fn message_needs_eof(&self) -> bool {
        if self.parser_type == ParserType::Request
        || self.is_bodyless_status()
        || self.flags.contains(Flags::SKIP_BODY) {
            return false;
        }

        if self.flags.contains(Flags::TRANSFER_ENCODING) && !self.flags.contains(Flags::CHUNKED) {
            return true;
        }

        !self.flags.intersects(Flags::CHUNKED | Flags::CONTENT_LENGTH)
    }

    /// Retrieve the request method.
    ///
    /// This is only available for request parsers, once the HTTP version has been parsed.
    pub fn method(&self) -> Option<Method> {
        if self.parser_type == ParserType::Request && self.http_major.is_some() {
            self.method
        } else {
            None
        }
    }

    /// Retrieve the parser type.
    pub fn parser_type(&self) -> ParserType {
        self.parser_type
    }

    /// Pause the parser. The next call to `execute()` returns `Success::Paused(0)`.
    pub fn pause(&mut self) -> Result<(), ControlError> {
        self.transfer("pause", Control::Running, Control::Paused)
    }

    /// Reset `Parser` to its initial state.
    ///
    /// The parser type and lenient flags are retained.
    pub fn reset(&mut self) {
        debug!("{:?} parser reset", self.parser_type);

        self.begin_message();

        self.byte_count = 0;
        self.control    = Control::Running;
        self.error      = None;
        self.state      = ParserState::MessageStart;
    }

    /// Resume a paused parser.
    pub fn resume(&mut self) -> Result<(), ControlError> {
        self.transfer("resume", Control::Paused, Control::Running)
    }

    /// Resume a parser whose message switched protocols.
    ///
    /// The upgraded message is never parsed further. Bytes supplied afterwards begin a new
    /// message.
    pub fn resume_after_upgrade(&mut self) -> Result<(), ControlError> {
        self.transfer("resume after upgrade", Control::PausedUpgrade, Control::Running)?;

        self.state = ParserState::MessageStart;

        Ok(())
    }

    /// Relax all strictness checks, or enforce all of them.
    pub fn set_lenient(&mut self, lenient: bool) {
        self.set_lenient_flags(if lenient {
            Lenient::all()
        } else {
            Lenient::empty()
        });
    }

    /// Set the relaxed strictness checks.
    pub fn set_lenient_flags(&mut self, lenient: Lenient) {
        debug!("{:?} parser lenient flags {:?}", self.parser_type, lenient);

        self.lenient = lenient;
    }

    /// Indicates that the connection should be kept alive after the current message.
    pub fn should_keep_alive(&self) -> bool {
        let major = self.http_major.unwrap_or(0);
        let minor = self.http_minor.unwrap_or(0);

        if major > 0 && minor > 0 {
            if self.flags.contains(Flags::CONNECTION_CLOSE) {
                return false;
            }
        } else if !self.flags.contains(Flags::CONNECTION_KEEP_ALIVE) {
            return false;
        }

        !self.message_needs_eof()
    }

    /// Retrieve the current state.
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Retrieve the response status code, once it has been parsed.
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Indicates that the current message switches protocols.
    ///
    /// This is decided before `on_headers_complete()` is executed.
    pub fn upgrade(&self) -> bool {
        self.upgrade
    }

    // ---------------------------------------------------------------------------------------------

    /// Clear all per-message state.
    fn begin_message(&mut self) {
        self.content_length = None;
        self.flags          = Flags::empty();
        self.http_major     = None;
        self.http_minor     = None;
        self.index          = 0;
        self.length         = 0;
        self.method         = None;
        self.method_length  = 0;
        self.status_code    = None;
        self.upgrade        = false;

        self.field.begin_field();

        self.whitespace_length = 0;
    }

    /// Fail the parser with `error`.
    fn fail(&mut self, error: ParserError) -> ParserError {
        debug!("{:?} parser failed: {}", self.parser_type, error);

        self.control = Control::Failed;
        self.error   = Some(error);
        self.state   = ParserState::Dead;

        error
    }

    /// Retrieve the error that failed the parser.
    fn failure(&self) -> ParserError {
        self.error.unwrap_or_else(|| {
            ParserError::new(ErrorKind::InvalidEofState, "Parser has failed", 0)
        })
    }

    /// Decide how the body is framed, once the header section and `on_headers_complete()` are
    /// done.
    fn frame_body(&mut self, offset: usize) -> Result<(), ParserError> {
        let has_body = self.flags.contains(Flags::CHUNKED)
                       || self.content_length.map_or(false, |length| length > 0);

        if self.upgrade
        && (self.method == Some(Method::Connect)
            || self.flags.contains(Flags::SKIP_BODY)
            || !has_body) {
            // the rest of the stream is another protocol
            self.state = ParserState::MessageComplete;
        } else if self.flags.contains(Flags::SKIP_BODY) || self.is_bodyless_status() {
            self.state = ParserState::MessageComplete;
        } else if self.flags.contains(Flags::CHUNKED) {
            self.state = ParserState::ChunkSizeStart;
        } else if self.flags.contains(Flags::TRANSFER_ENCODING) {
            if self.parser_type == ParserType::Request
            && !self.lenient.contains(Lenient::TRANSFER_ENCODING) {
                return Err(ParserError::new(
                    ErrorKind::InvalidTransferEncoding,
                    "Request has invalid `Transfer-Encoding`",
                    offset
                ));
            }

            self.state = ParserState::BodyIdentityEof;
        } else if !self.flags.contains(Flags::CONTENT_LENGTH) {
            self.state = if self.message_needs_eof() {
                ParserState::BodyIdentityEof
            } else {
                ParserState::MessageComplete
            };
        } else {
            match self.content_length {
                Some(length) if length > 0 => {
                    self.length = length;
                    self.state  = ParserState::BodyIdentity;
                },
                _ => {
                    self.state = ParserState::MessageComplete;
                }
            }
        }

        Ok(())
    }

    /// Indicates that the response status forbids a body.
    fn is_bodyless_status(&self) -> bool {
        match self.status_code {
            Some(status) if self.parser_type == ParserType::Response => {
                status / 100 == 1 || status == 204 || status == 304
            },
            _ => false
        }
    }

    /// Change the control state from `from` to `to`.
    fn transfer(&mut self, operation: &'static str, from: Control, to: Control)
    -> Result<(), ControlError> {
        if self.control != from {
            return Err(ControlError {
                operation: operation,
                state:     self.control
            });
        }

        debug!("{:?} parser {}", self.parser_type, operation);

        self.control = to;

        Ok(())
    }

    /// Execute the function of the current state.
    #[inline]
    fn dispatch<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        match self.state {
            ParserState::Dead                  => Err(self.failure()),
            ParserState::MessageStart          => self.message_start(handler, context),
            ParserState::Closed                => self.closed(handler, context),
            ParserState::RequestMethod         => self.request_method(handler, context),
            ParserState::RequestUrl1           => self.request_url1(handler, context),
            ParserState::RequestUrl2           => self.request_url2(handler, context),
            ParserState::Protocol              => self.protocol(handler, context),
            ParserState::VersionMajor          => self.version_major(handler, context),
            ParserState::VersionPeriod         => self.version_period(handler, context),
            ParserState::VersionMinor          => self.version_minor(handler, context),
            ParserState::VersionEnd            => self.version_end(handler, context),
            ParserState::ResponseStatusCode    => self.response_status_code(handler, context),
            ParserState::ResponseStatusCodeEnd => self.response_status_code_end(handler, context),
            ParserState::ResponseStatus        => self.response_status(handler, context),
            ParserState::InitialLf             => self.initial_lf(handler, context),
            ParserState::HeaderFieldStart      => self.header_field_start(handler, context),
            ParserState::HeaderField           => self.header_field(handler, context),
            ParserState::StripHeaderValue      => self.strip_header_value(handler, context),
            ParserState::HeaderValue           => self.header_value(handler, context),
            ParserState::HeaderValueLf         => self.header_value_lf(handler, context),
            ParserState::HeadersLf             => self.headers_lf(handler, context),
            ParserState::HeadersComplete       => self.headers_complete(handler, context),
            ParserState::BodyIdentity          => self.body_identity(handler, context),
            ParserState::BodyIdentityEof       => self.body_identity_eof(handler, context),
            ParserState::ChunkSizeStart        => self.chunk_size_start(handler, context),
            ParserState::ChunkSize             => self.chunk_size(handler, context),
            ParserState::ChunkExtensions       => self.chunk_extensions(handler, context),
            ParserState::ChunkSizeLf           => self.chunk_size_lf(handler, context),
            ParserState::ChunkHeader           => self.chunk_header(handler, context),
            ParserState::ChunkData             => self.chunk_data(handler, context),
            ParserState::ChunkDataCr           => self.chunk_data_cr(handler, context),
            ParserState::ChunkDataLf           => self.chunk_data_lf(handler, context),
            ParserState::ChunkComplete         => self.chunk_complete(handler, context),
            ParserState::MessageComplete       => self.message_complete(handler, context),
            ParserState::Upgrade               => self.upgraded(handler, context)
        }
    }

    // ---------------------------------------------------------------------------------------------
    // RFC RULES
    // ---------------------------------------------------------------------------------------------

    /*
    RFC 9112 message grammar.

    HTTP-message   = start-line CRLF
                     *( field-line CRLF )
                     CRLF
                     [ message-body ]

    start-line     = request-line / status-line
    request-line   = method SP request-target SP HTTP-version
    status-line    = HTTP-version SP status-code SP [ reason-phrase ]

    HTTP-version   = HTTP-name "/" DIGIT "." DIGIT
    HTTP-name      = %s"HTTP"
    status-code    = 3DIGIT
    reason-phrase  = 1*( HTAB / SP / VCHAR / obs-text )

    field-line     = field-name ":" OWS field-value OWS
    field-value    = *field-content
    field-content  = field-vchar
                     [ 1*( SP / HTAB / field-vchar ) field-vchar ]
    field-vchar    = VCHAR / obs-text

    In the interest of robustness, a server that is expecting to receive and parse a request-line
    SHOULD ignore at least one empty line (CRLF) received prior to the request-line.

    A server that receives an obs-fold in a request message that is not within a message/http
    container MUST either reject the message by sending a 400 (Bad Request), or replace each
    received obs-fold with one or more SP octets. This parser rejects obs-fold.

    chunked-body   = *chunk
                     last-chunk
                     trailer-section
                     CRLF

    chunk          = chunk-size [ chunk-ext ] CRLF
                     chunk-data CRLF
    chunk-size     = 1*HEXDIG
    last-chunk     = 1*("0") [ chunk-ext ] CRLF
    chunk-ext      = *( BWS ";" BWS chunk-ext-name
                        [ BWS "=" BWS chunk-ext-val ] )
    trailer-section = *( field-line CRLF )
    */

    // ---------------------------------------------------------------------------------------------
    // CONNECTION STATES
    // ---------------------------------------------------------------------------------------------

    #[inline]
    fn message_start<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        loop {
            exit_if_eos!(context);
            bs_next!(context);

            if context.byte != b'\r' && context.byte != b'\n' {
                break;
            }
        }

        // the first byte belongs to the start line
        bs_replay!(context);

        self.begin_message();

        trace!("{:?} message begin", self.parser_type);

        if self.parser_type == ParserType::Request {
            set_state!(self, RequestMethod);
        } else {
            set_state!(self, Protocol);
        }

        callback!(context, on_message_begin, handler.on_message_begin(), {
            transition!(self, context);
        });
    }

    #[inline]
    fn closed<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        loop {
            exit_if_eos!(context);
            bs_next!(context);

            if context.byte != b'\r' && context.byte != b'\n' {
                break;
            }
        }

        if self.lenient.contains(Lenient::KEEP_ALIVE) {
            bs_replay!(context);

            transition!(self, context, MessageStart);
        }

        exit_error!(context, ClosedConnection, "Data after `Connection: close`");
    }

    #[inline]
    fn upgraded<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_upgrade!(context);
    }

    // ---------------------------------------------------------------------------------------------
    // REQUEST STATES
    // ---------------------------------------------------------------------------------------------

    #[inline]
    fn request_method<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        if self.method_length == 0 {
            // the most common methods are compared immediately, without collecting
            if starts_with!(context, b"GET ") {
                bs_jump!(context, 4);

                self.method = Some(Method::Get);

                transition!(self, context, RequestUrl1);
            } else if starts_with!(context, b"POST ") {
                bs_jump!(context, 5);

                self.method = Some(Method::Post);

                transition!(self, context, RequestUrl1);
            }
        }

        loop {
            exit_if_eos!(context);
            bs_next!(context);

            if (context.byte > 0x40 && context.byte < 0x5B) || context.byte == b'-' {
                if self.method_length == METHOD_MAX_LENGTH {
                    exit_error!(context, InvalidMethod, "Invalid method encountered");
                }

                self.method_buffer[self.method_length] = context.byte;
                self.method_length                    += 1;
            } else {
                break;
            }
        }

        if context.byte == b' ' {
            if let Some(method) = Method::from_bytes(&self.method_buffer[..self.method_length]) {
                self.method = Some(method);

                transition!(self, context, RequestUrl1);
            }
        }

        exit_error!(context, InvalidMethod, "Invalid method encountered");
    }

    #[inline]
    fn request_url1<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(context);
        bs_next!(context);

        if is_url(context.byte) {
            // mark the first byte for collection
            bs_replay!(context);

            transition!(self, context, RequestUrl2);
        }

        exit_error!(context, InvalidUrl, "Unexpected start char in url");
    }

    #[inline]
    fn request_url2<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        loop {
            if bs_is_eos!(context) {
                callback_eos_expr!(handler, context, on_url);
            }

            bs_next!(context);

            if !is_url(context.byte) {
                break;
            }
        }

        if context.byte == b' ' {
            self.index = 0;

            callback_ignore_transition!(self, handler, context, on_url, Protocol);
        }

        exit_error!(context, InvalidUrl, "Invalid characters in url");
    }

    // ---------------------------------------------------------------------------------------------
    // VERSION STATES
    // ---------------------------------------------------------------------------------------------

    #[inline]
    fn protocol<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        if self.index == 0 && bs_has_bytes!(context, 8) && starts_with!(context, b"HTTP/") {
            // have enough bytes to parse the version immediately
            let major  = context.stream[context.stream_index + 5];
            let period = context.stream[context.stream_index + 6];
            let minor  = context.stream[context.stream_index + 7];

            if is_digit!(major) && period == b'.' && is_digit!(minor) {
                bs_jump!(context, 8);

                self.http_major = Some(major - b'0');
                self.http_minor = Some(minor - b'0');

                transition!(self, context, VersionEnd);
            }
        }

        loop {
            exit_if_eos!(context);
            bs_next!(context);

            if context.byte != b"HTTP/"[self.index as usize] {
                exit_error!(context, InvalidConstant, "Expected HTTP/");
            }

            self.index += 1;

            if self.index == 5 {
                transition!(self, context, VersionMajor);
            }
        }
    }

    #[inline]
    fn version_major<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(context);
        bs_next!(context);

        if is_digit!(context.byte) {
            self.http_major = Some(context.byte - b'0');

            transition!(self, context, VersionPeriod);
        }

        exit_error!(context, InvalidVersion, "Invalid major version");
    }

    #[inline]
    fn version_period<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(context);
        bs_next!(context);

        if context.byte == b'.' {
            transition!(self, context, VersionMinor);
        }

        exit_error!(context, InvalidVersion, "Expected dot");
    }

    #[inline]
    fn version_minor<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(context);
        bs_next!(context);

        if is_digit!(context.byte) {
            self.http_minor = Some(context.byte - b'0');

            transition!(self, context, VersionEnd);
        }

        exit_error!(context, InvalidVersion, "Invalid minor version");
    }

    #[inline]
    fn version_end<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(context);
        bs_next!(context);

        if self.parser_type == ParserType::Response {
            if context.byte == b' ' {
                self.index  = 0;
                self.length = 0;

                transition!(self, context, ResponseStatusCode);
            }

            exit_error!(context, InvalidVersion, "Expected space after version");
        }

        if context.byte == b'\r' {
            transition!(self, context, InitialLf);
        } else if context.byte == b'\n' {
            bare_lf!(self, context, "Missing expected CR after version", {
                transition!(self, context, HeaderFieldStart);
            });
        }

        exit_error!(context, InvalidVersion, "Expected CRLF after version");
    }

    // ---------------------------------------------------------------------------------------------
    // RESPONSE STATES
    // ---------------------------------------------------------------------------------------------

    #[inline]
    fn response_status_code<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        loop {
            exit_if_eos!(context);
            bs_next!(context);

            if !is_digit!(context.byte) {
                exit_error!(context, InvalidStatus, "Invalid status code");
            }

            self.length  = self.length * 10 + (context.byte - b'0') as u64;
            self.index  += 1;

            if self.index == 3 {
                self.status_code = Some(self.length as u16);
                self.length      = 0;

                transition!(self, context, ResponseStatusCodeEnd);
            }
        }
    }

    #[inline]
    fn response_status_code_end<T: HttpHandler>(&mut self, _handler: &mut T,
                                                context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(context);
        bs_next!(context);

        if context.byte == b' ' {
            transition!(self, context, ResponseStatus);
        } else if context.byte == b'\r' {
            transition!(self, context, InitialLf);
        } else if context.byte == b'\n' {
            bare_lf!(self, context, "Missing expected CR after status code", {
                transition!(self, context, HeaderFieldStart);
            });
        }

        exit_error!(context, InvalidStatus, "Invalid response status");
    }

    #[inline]
    fn response_status<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        loop {
            if bs_is_eos!(context) {
                callback_eos_expr!(handler, context, on_status);
            }

            bs_next!(context);

            if !is_field_content(context.byte) {
                break;
            }
        }

        if context.byte == b'\r' {
            callback_ignore_transition!(self, handler, context, on_status, InitialLf);
        } else if context.byte == b'\n' {
            bare_lf!(self, context, "Missing expected CR after response status", {
                callback_ignore_transition!(self, handler, context, on_status, HeaderFieldStart);
            });
        }

        exit_error!(context, InvalidStatus, "Invalid response status");
    }

    // ---------------------------------------------------------------------------------------------
    // HEADER STATES
    // ---------------------------------------------------------------------------------------------

    #[inline]
    fn initial_lf<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(context);
        bs_next!(context);

        if context.byte == b'\n' {
            transition!(self, context, HeaderFieldStart);
        }

        exit_error!(context, LfExpected, "Missing expected LF after start line");
    }

    #[inline]
    fn header_field_start<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(context);
        bs_next!(context);

        if is_token(context.byte) {
            // mark the first byte for collection
            bs_replay!(context);

            self.field.begin_field();

            transition!(self, context, HeaderField);
        } else if context.byte == b'\r' {
            transition!(self, context, HeadersLf);
        } else if context.byte == b'\n' {
            bare_lf!(self, context, "Missing expected CR after headers", {
                transition!(self, context, HeadersComplete);
            });
        } else if is_space!(context.byte) {
            exit_error!(context, InvalidHeaderToken, "Unexpected whitespace after header line");
        }

        exit_error!(context, InvalidHeaderToken, "Invalid header field char");
    }

    #[inline]
    fn header_field<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        loop {
            if bs_is_eos!(context) {
                callback_eos_expr!(handler, context, on_header_field);
            }

            bs_next!(context);

            if is_token(context.byte) {
                self.field.field_byte(context.byte);
            } else {
                break;
            }
        }

        if context.byte == b':' {
            let trailing = self.flags.contains(Flags::TRAILING);

            self.field.end_field(trailing, &mut self.flags);

            callback_ignore_transition!(self, handler, context, on_header_field, StripHeaderValue);
        }

        exit_error!(context, InvalidHeaderToken, "Invalid header token");
    }

    #[inline]
    fn strip_header_value<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        loop {
            exit_if_eos!(context);
            bs_next!(context);

            if !is_space!(context.byte) {
                break;
            }
        }

        // the value, or its line ending, begins here
        bs_replay!(context);

        transition!(self, context, HeaderValue);
    }

    #[inline]
    fn header_value<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        // end of the value collected from this stream, excluding trailing whitespace
        let mut end = context.mark_index;

        loop {
            if bs_is_eos!(context) {
                let length = context.stream_index - end;

                self.whitespace[self.whitespace_length..self.whitespace_length + length]
                    .copy_from_slice(&context.stream[end..context.stream_index]);

                self.whitespace_length += length;

                callback_data!(handler, context, on_header_value,
                               &context.stream[context.mark_index..end], {
                    exit_eos!(context);
                });
            }

            bs_next!(context);

            if context.byte == b'\r' || context.byte == b'\n' {
                break;
            }

            if !is_space!(context.byte) {
                if !is_field_content(context.byte)
                && !self.lenient.contains(Lenient::HEADER_VALUES) {
                    exit_error!(context, InvalidHeaderToken, "Invalid header value char");
                }

                if self.whitespace_length > 0 {
                    // whitespace held back from the previous stream is inside the value
                    let signal = handler.on_header_value(
                        &self.whitespace[..self.whitespace_length]
                    );

                    self.whitespace_length = 0;

                    if signal != Signal::Continue && signal != Signal::SkipBody {
                        // bytes of this stream have not been supplied yet
                        context.stream_index = context.mark_index;
                    }

                    match signal {
                        Signal::Continue | Signal::SkipBody => {
                        },
                        Signal::Pause | Signal::PauseUpgrade => {
                            exit_paused!(context);
                        },
                        Signal::Abort => {
                            exit_abort!(context, on_header_value);
                        }
                    }
                }

                end = context.stream_index;
            } else if self.whitespace_length + context.stream_index - end > WHITESPACE_MAX_LENGTH {
                exit_error!(context, InvalidHeaderToken, "Header value whitespace too long");
            }

            if self.field.kind() != HeaderKind::General {
                let offset = context.stream_index - 1;

                self.field
                    .value_byte(context.byte, &mut self.flags)
                    .map_err(|(kind, reason)| ParserError::new(kind, reason, offset))?;
            }
        }

        let offset = context.stream_index - 1;

        // trailing whitespace is never part of the value
        self.whitespace_length = 0;

        self.field
            .end_value(&mut self.flags, &mut self.content_length, self.lenient)
            .map_err(|(kind, reason)| ParserError::new(kind, reason, offset))?;

        if context.byte == b'\r' {
            set_state!(self, HeaderValueLf);
        } else {
            bare_lf!(self, context, "Missing expected CR after header value", {
                set_state!(self, HeaderFieldStart);
            });
        }

        callback_data!(handler, context, on_header_value,
                       &context.stream[context.mark_index..end], {
            transition!(self, context);
        });
    }

    #[inline]
    fn header_value_lf<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(context);
        bs_next!(context);

        if context.byte == b'\n' {
            transition!(self, context, HeaderFieldStart);
        }

        exit_error!(context, LfExpected, "Missing expected LF after header value");
    }

    #[inline]
    fn headers_lf<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(context);
        bs_next!(context);

        if context.byte == b'\n' {
            transition!(self, context, HeadersComplete);
        }

        exit_error!(context, LfExpected, "Missing expected LF after headers");
    }

    #[inline]
    fn headers_complete<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        if self.flags.contains(Flags::TRAILING) {
            // trailer section of the last chunk
            callback_transition!(self, handler, context, on_chunk_complete, MessageComplete);
        }

        if self.flags.contains(Flags::TRANSFER_ENCODING | Flags::CONTENT_LENGTH)
        && !self.lenient.contains(Lenient::CHUNKED_LENGTH) {
            exit_error_at!(
                UnexpectedContentLength,
                "Content-Length can't be present with Transfer-Encoding",
                context.stream_index
            );
        }

        self.upgrade = if self.flags.contains(Flags::UPGRADE | Flags::CONNECTION_UPGRADE) {
            // a response only switches protocols with 101 Switching Protocols
            self.parser_type == ParserType::Request || self.status_code == Some(101)
        } else {
            self.method == Some(Method::Connect)
        };

        let signal = handler.on_headers_complete();

        match signal {
            Signal::SkipBody => {
                self.flags.insert(Flags::SKIP_BODY);
            },
            Signal::PauseUpgrade => {
                self.flags.insert(Flags::SKIP_BODY);

                self.upgrade = true;
            },
            Signal::Abort => {
                exit_abort!(context, on_headers_complete);
            },
            Signal::Continue | Signal::Pause => {
            }
        }

        self.frame_body(context.stream_index)?;

        if signal == Signal::Pause {
            exit_paused!(context);
        }

        transition!(self, context);
    }

    // ---------------------------------------------------------------------------------------------
    // BODY STATES
    // ---------------------------------------------------------------------------------------------

    #[inline]
    fn body_identity<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(context);

        let length = cmp::min(bs_available!(context) as u64, self.length) as usize;

        bs_mark!(context, context.stream_index);
        bs_jump!(context, length);

        self.length -= length as u64;

        if self.length == 0 {
            set_state!(self, MessageComplete);
        }

        callback_data!(handler, context, on_body, bs_slice!(context), {
            transition!(self, context);
        });
    }

    #[inline]
    fn body_identity_eof<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(context);

        let length = bs_available!(context);

        bs_mark!(context, context.stream_index);
        bs_jump!(context, length);

        callback_data!(handler, context, on_body, bs_slice!(context), {
            exit_eos!(context);
        });
    }

    // ---------------------------------------------------------------------------------------------
    // CHUNK STATES
    // ---------------------------------------------------------------------------------------------

    #[inline]
    fn chunk_size_start<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(context);
        bs_next!(context);

        if is_hex!(context.byte) {
            self.length = hex_to_byte!(context.byte) as u64;

            transition!(self, context, ChunkSize);
        }

        exit_error!(context, InvalidChunkSize, "Invalid character in chunk size");
    }

    #[inline]
    fn chunk_size<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        loop {
            exit_if_eos!(context);
            bs_next!(context);

            if !is_hex!(context.byte) {
                break;
            }

            let digit = hex_to_byte!(context.byte) as u64;

            match self.length.checked_mul(16).and_then(|length| length.checked_add(digit)) {
                Some(length) => {
                    self.length = length;
                },
                None => {
                    exit_error!(context, InvalidChunkSize, "Chunk size overflow");
                }
            }
        }

        if context.byte == b'\r' {
            transition!(self, context, ChunkSizeLf);
        } else if context.byte == b';' {
            transition!(self, context, ChunkExtensions);
        } else if context.byte == b'\n' {
            bare_lf!(self, context, "Missing expected CR after chunk size", {
                transition!(self, context, ChunkHeader);
            });
        }

        exit_error!(context, InvalidChunkSize, "Invalid character in chunk size");
    }

    #[inline]
    fn chunk_extensions<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        loop {
            exit_if_eos!(context);
            bs_next!(context);

            if context.byte == b'\r' {
                transition!(self, context, ChunkSizeLf);
            } else if context.byte == b'\n' {
                bare_lf!(self, context, "Missing expected CR after chunk extensions", {
                    transition!(self, context, ChunkHeader);
                });
            } else if !is_field_content(context.byte) {
                exit_error!(context, Strict, "Invalid character in chunk extensions");
            }
        }
    }

    #[inline]
    fn chunk_size_lf<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(context);
        bs_next!(context);

        if context.byte == b'\n' {
            transition!(self, context, ChunkHeader);
        }

        exit_error!(context, LfExpected, "Missing expected LF after chunk size");
    }

    #[inline]
    fn chunk_header<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        if self.length == 0 {
            // last chunk, trailers follow
            self.flags.insert(Flags::TRAILING);

            callback_transition!(self, handler, context, on_chunk_header, HeaderFieldStart);
        }

        callback_transition!(self, handler, context, on_chunk_header, ChunkData);
    }

    #[inline]
    fn chunk_data<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(context);

        let length = cmp::min(bs_available!(context) as u64, self.length) as usize;

        bs_mark!(context, context.stream_index);
        bs_jump!(context, length);

        self.length -= length as u64;

        if self.length == 0 {
            set_state!(self, ChunkDataCr);
        }

        callback_data!(handler, context, on_body, bs_slice!(context), {
            transition!(self, context);
        });
    }

    #[inline]
    fn chunk_data_cr<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(context);
        bs_next!(context);

        if context.byte == b'\r' {
            transition!(self, context, ChunkDataLf);
        } else if context.byte == b'\n' {
            bare_lf!(self, context, "Missing expected CR after chunk data", {
                transition!(self, context, ChunkComplete);
            });
        }

        exit_error!(context, Strict, "Expected CRLF after chunk data");
    }

    #[inline]
    fn chunk_data_lf<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(context);
        bs_next!(context);

        if context.byte == b'\n' {
            transition!(self, context, ChunkComplete);
        }

        exit_error!(context, LfExpected, "Missing expected LF after chunk data");
    }

    #[inline]
    fn chunk_complete<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        callback_transition!(self, handler, context, on_chunk_complete, ChunkSizeStart);
    }

    // ---------------------------------------------------------------------------------------------
    // FINISHED STATES
    // ---------------------------------------------------------------------------------------------

    #[inline]
    fn message_complete<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        trace!("{:?} message complete", self.parser_type);

        if self.upgrade {
            set_state!(self, Upgrade);
        } else if self.should_keep_alive() {
            set_state!(self, MessageStart);
        } else {
            set_state!(self, Closed);
        }

        match handler.on_message_complete() {
            Signal::Abort => {
                exit_abort!(context, on_message_complete);
            },
            _ if self.upgrade => {
                exit_upgrade!(context);
            },
            Signal::Pause | Signal::PauseUpgrade => {
                exit_paused!(context);
            },
            Signal::Continue | Signal::SkipBody => {
                transition!(self, context);
            }
        }
    }
}
