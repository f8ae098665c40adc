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

/// Longest method name in bytes.
pub const METHOD_MAX_LENGTH: usize = 11;

/// Method names, indexed by `Method as usize`.
const NAMES: [&str; 35] = [
    "DELETE",
    "GET",
    "HEAD",
    "POST",
    "PUT",
    "CONNECT",
    "OPTIONS",
    "TRACE",
    "COPY",
    "LOCK",
    "MKCOL",
    "MOVE",
    "PROPFIND",
    "PROPPATCH",
    "SEARCH",
    "UNLOCK",
    "BIND",
    "REBIND",
    "UNBIND",
    "ACL",
    "REPORT",
    "MKACTIVITY",
    "CHECKOUT",
    "MERGE",
    "M-SEARCH",
    "NOTIFY",
    "SUBSCRIBE",
    "UNSUBSCRIBE",
    "PATCH",
    "PURGE",
    "MKCALENDAR",
    "LINK",
    "UNLINK",
    "SOURCE",
    "PRI"
];

/// Methods, indexed by `Method as usize`.
const METHODS: [Method; 35] = [
    Method::Delete,
    Method::Get,
    Method::Head,
    Method::Post,
    Method::Put,
    Method::Connect,
    Method::Options,
    Method::Trace,
    Method::Copy,
    Method::Lock,
    Method::Mkcol,
    Method::Move,
    Method::Propfind,
    Method::Proppatch,
    Method::Search,
    Method::Unlock,
    Method::Bind,
    Method::Rebind,
    Method::Unbind,
    Method::Acl,
    Method::Report,
    Method::Mkactivity,
    Method::Checkout,
    Method::Merge,
    Method::MSearch,
    Method::Notify,
    Method::Subscribe,
    Method::Unsubscribe,
    Method::Patch,
    Method::Purge,
    Method::Mkcalendar,
    Method::Link,
    Method::Unlink,
    Method::Source,
    Method::Pri
];

/// Request methods.
///
/// Discriminants are stable.
#[derive(Clone,Copy,Debug,Eq,Hash,PartialEq)]
#[repr(u8)]
pub enum Method {
    Delete = 0,
    Get = 1,
    Head = 2,
    Post = 3,
    Put = 4,
    Connect = 5,
    Options = 6,
    Trace = 7,

    // WebDAV
    Copy = 8,
    Lock = 9,
    Mkcol = 10,
    Move = 11,
    Propfind = 12,
    Proppatch = 13,
    Search = 14,
    Unlock = 15,
    Bind = 16,
    Rebind = 17,
    Unbind = 18,
    Acl = 19,

    // subversion
    Report = 20,
    Mkactivity = 21,
    Checkout = 22,
    Merge = 23,

    // upnp
    MSearch = 24,
    Notify = 25,
    Subscribe = 26,
    Unsubscribe = 27,

    // RFC 5789
    Patch = 28,
    Purge = 29,

    // CalDAV
    Mkcalendar = 30,

    // RFC 2068
    Link = 31,
    Unlink = 32,

    // icecast
    Source = 33,

    // HTTP/2 connection preface
    Pri = 34
}

impl Method {
    /// Find the method named exactly `name`.
    ///
    /// Method names are case-sensitive.
    pub fn from_bytes(name: &[u8]) -> Option<Method> {
        if name.len() > METHOD_MAX_LENGTH {
            return None;
        }

        NAMES.iter()
             .position(|n| n.as_bytes() == name)
             .map(|index| METHODS[index])
    }

    /// Create a new `Method` from its discriminant.
    pub fn from_u8(byte: u8) -> Option<Method> {
        METHODS.get(byte as usize).cloned()
    }

    /// Retrieve the method name.
    pub fn as_str(&self) -> &'static str {
        NAMES[*self as usize]
    }
}

impl fmt::Display for Method {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
