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

/// Callback return values.
#[derive(Clone,Copy,Debug,Eq,PartialEq)]
pub enum Signal {
    /// Continue parsing.
    Continue,

    /// Stop parsing after this callback, and return
    /// [`Success::Paused`](../fsm/enum.Success.html#variant.Paused).
    Pause,

    /// Only meaningful from `on_headers_complete()`: the connection switches protocols. The body
    /// is skipped, the message completes, and
    /// [`Success::PausedUpgrade`](../fsm/enum.Success.html#variant.PausedUpgrade) is returned.
    ///
    /// Any other callback treats this as `Signal::Pause`.
    PauseUpgrade,

    /// Only meaningful from `on_headers_complete()`: the message has no body, such as the
    /// response to a `HEAD` request.
    ///
    /// Any other callback treats this as `Signal::Continue`.
    SkipBody,

    /// Stop parsing with an [`ErrorKind::User`](enum.ErrorKind.html#variant.User) error.
    Abort
}

/// Type that handles HTTP/1.x parser events.
///
/// Every callback returns [`Signal::Continue`](enum.Signal.html#variant.Continue) by default.
///
/// Data supplied to a callback is only valid for the duration of the call. Copy what needs to be
/// retained.
#[allow(unused_variables)]
pub trait HttpHandler {
    /// Callback that is executed when body data has been located.
    ///
    /// *Note:* This may be executed multiple times in order to supply the entire segment. Chunk
    /// data of chunked bodies is supplied through this callback as well.
    fn on_body(&mut self, data: &[u8]) -> Signal {
        Signal::Continue
    }

    /// Callback that is executed when a chunk has been fully parsed, including its trailing CRLF.
    ///
    /// **Called When:**
    ///
    /// After the data of each chunk. After the trailer section for the final zero-size chunk.
    fn on_chunk_complete(&mut self) -> Signal {
        Signal::Continue
    }

    /// Callback that is executed when a chunk size line has been parsed.
    ///
    /// **Called When:**
    ///
    /// Before the data of each chunk, including the final zero-size chunk.
    fn on_chunk_header(&mut self) -> Signal {
        Signal::Continue
    }

    /// Callback that is executed when a header field has been located.
    ///
    /// *Note:* This may be executed multiple times in order to supply the entire segment.
    ///
    /// **Called When:**
    ///
    /// During header parsing, and during trailer parsing of chunked bodies.
    fn on_header_field(&mut self, field: &[u8]) -> Signal {
        Signal::Continue
    }

    /// Callback that is executed when a header value has been located.
    ///
    /// Leading and trailing whitespace is never supplied.
    ///
    /// *Note:* This may be executed multiple times in order to supply the entire segment.
    fn on_header_value(&mut self, value: &[u8]) -> Signal {
        Signal::Continue
    }

    /// Callback that is executed when the header section has been parsed.
    ///
    /// Framing details, such as
    /// [`Parser::content_length()`](struct.Parser.html#method.content_length) and
    /// [`Parser::upgrade()`](struct.Parser.html#method.upgrade), are available from this point
    /// on.
    ///
    /// **Returns:**
    ///
    /// Besides `Signal::Continue`, `Signal::Pause`, and `Signal::Abort`, this callback may return
    /// `Signal::SkipBody` or `Signal::PauseUpgrade`.
    fn on_headers_complete(&mut self) -> Signal {
        Signal::Continue
    }

    /// Callback that is executed when a new message begins.
    fn on_message_begin(&mut self) -> Signal {
        Signal::Continue
    }

    /// Callback that is executed when a message has been fully parsed.
    fn on_message_complete(&mut self) -> Signal {
        Signal::Continue
    }

    /// Callback that is executed when a response reason phrase has been located.
    ///
    /// *Note:* This may be executed multiple times in order to supply the entire segment. It is
    /// not executed for an empty reason phrase.
    fn on_status(&mut self, status: &[u8]) -> Signal {
        Signal::Continue
    }

    /// Callback that is executed when a request target has been located.
    ///
    /// *Note:* This may be executed multiple times in order to supply the entire segment.
    fn on_url(&mut self, url: &[u8]) -> Signal {
        Signal::Continue
    }
}
