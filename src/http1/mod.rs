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

//! HTTP/1.x parser, errors, traits, and types.

mod control;
mod flags;
mod header;
mod http_handler;
mod method;
mod parser;
mod parser_error;
mod parser_state;
mod parser_type;

#[cfg(test)]
mod test;

pub use crate::http1::control::{ Control, ControlError };
pub use crate::http1::flags::Lenient;
pub use crate::http1::http_handler::{ HttpHandler, Signal };
pub use crate::http1::method::Method;
pub use crate::http1::parser::{ Parser, WHITESPACE_MAX_LENGTH };
pub use crate::http1::parser_error::{ ErrorKind, ErrorStage, ParserError };
pub use crate::http1::parser_state::ParserState;
pub use crate::http1::parser_type::ParserType;
