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

/// Parser states.
#[derive(Clone,Copy,Debug,Eq,PartialEq)]
#[repr(u8)]
pub enum ParserState {
    /// An error was returned from a call to `Parser::execute()` or `Parser::finish()`.
    Dead,

    /// Skipping CRLF before a message, and detecting its first byte.
    MessageStart,

    /// A message that closes the connection has completed. Only CRLF is accepted.
    Closed,

    // ---------------------------------------------------------------------------------------------
    // REQUEST
    // ---------------------------------------------------------------------------------------------

    /// Parsing request method.
    RequestMethod,

    /// Parsing request URL byte 1.
    RequestUrl1,

    /// Parsing request URL byte 2+.
    RequestUrl2,

    // ---------------------------------------------------------------------------------------------
    // VERSION
    // ---------------------------------------------------------------------------------------------

    /// Parsing the `HTTP/` protocol constant.
    Protocol,

    /// Parsing HTTP major version.
    VersionMajor,

    /// Parsing period between HTTP major and minor versions.
    VersionPeriod,

    /// Parsing HTTP minor version.
    VersionMinor,

    /// Parsing the byte that follows the HTTP version.
    VersionEnd,

    // ---------------------------------------------------------------------------------------------
    // RESPONSE
    // ---------------------------------------------------------------------------------------------

    /// Parsing response status code.
    ResponseStatusCode,

    /// Parsing the byte that follows the response status code.
    ResponseStatusCodeEnd,

    /// Parsing response reason phrase.
    ResponseStatus,

    // ---------------------------------------------------------------------------------------------
    // HEADERS
    // ---------------------------------------------------------------------------------------------

    /// Parsing line feed after the initial request/response line.
    InitialLf,

    /// Detecting a header field, or the end of the header section.
    HeaderFieldStart,

    /// Parsing header field.
    HeaderField,

    /// Stripping whitespace before header value.
    StripHeaderValue,

    /// Parsing header value.
    HeaderValue,

    /// Parsing line feed after header value.
    HeaderValueLf,

    /// Parsing line feed that ends the header section.
    HeadersLf,

    /// Header section has been parsed, deciding how the body is framed.
    HeadersComplete,

    // ---------------------------------------------------------------------------------------------
    // BODY
    // ---------------------------------------------------------------------------------------------

    /// Parsing a body of known length.
    BodyIdentity,

    /// Parsing a body that ends when the connection closes.
    BodyIdentityEof,

    // ---------------------------------------------------------------------------------------------
    // CHUNKED
    // ---------------------------------------------------------------------------------------------

    /// Parsing chunk size byte 1.
    ChunkSizeStart,

    /// Parsing chunk size byte 2+.
    ChunkSize,

    /// Skipping chunk extensions.
    ChunkExtensions,

    /// Parsing line feed after chunk size.
    ChunkSizeLf,

    /// Chunk size line has been parsed.
    ChunkHeader,

    /// Parsing chunk data.
    ChunkData,

    /// Parsing carriage return after chunk data.
    ChunkDataCr,

    /// Parsing line feed after chunk data.
    ChunkDataLf,

    /// Chunk has been parsed.
    ChunkComplete,

    // ---------------------------------------------------------------------------------------------
    // FINISHED
    // ---------------------------------------------------------------------------------------------

    /// Message has been parsed.
    MessageComplete,

    /// Message switched protocols. No further bytes are parsed until
    /// `Parser::resume_after_upgrade()`.
    Upgrade
}
