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

use bitflags::bitflags;

bitflags! {
    /// Per-message framing flags.
    ///
    /// Cleared when each message begins.
    pub struct Flags: u16 {
        /// `Connection: keep-alive` was found.
        const CONNECTION_KEEP_ALIVE = 1 << 0;

        /// `Connection: close` was found.
        const CONNECTION_CLOSE = 1 << 1;

        /// `Connection: upgrade` was found.
        const CONNECTION_UPGRADE = 1 << 2;

        /// The final transfer coding is `chunked`.
        const CHUNKED = 1 << 3;

        /// An `Upgrade` header was found.
        const UPGRADE = 1 << 4;

        /// A `Content-Length` header was found.
        const CONTENT_LENGTH = 1 << 5;

        /// The body is skipped, as instructed by `on_headers_complete()`.
        const SKIP_BODY = 1 << 6;

        /// Parsing the trailer section of a chunked body.
        const TRAILING = 1 << 7;

        /// A `Transfer-Encoding` header was found.
        const TRANSFER_ENCODING = 1 << 8;
    }
}

bitflags! {
    /// Strictness checks that may be relaxed for interoperability with non-conformant peers.
    ///
    /// All checks are enforced by default.
    pub struct Lenient: u8 {
        /// Accept a bare LF wherever CRLF is required.
        const LINE_ENDINGS = 1 << 0;

        /// Accept control characters other than CR and LF within header values.
        const HEADER_VALUES = 1 << 1;

        /// Accept `Content-Length` alongside `Transfer-Encoding`. `Transfer-Encoding` decides
        /// framing.
        const CHUNKED_LENGTH = 1 << 2;

        /// Accept a repeated `Content-Length` when every value is identical.
        const DUPLICATE_LENGTH = 1 << 3;

        /// Accept another message after one that closes the connection.
        const KEEP_ALIVE = 1 << 4;

        /// Read a request body until EOF when `Transfer-Encoding` does not end with `chunked`.
        const TRANSFER_ENCODING = 1 << 5;
    }
}
