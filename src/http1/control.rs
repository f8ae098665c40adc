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

/// Control states.
#[derive(Clone,Copy,Debug,Eq,PartialEq)]
pub enum Control {
    /// Accepting input.
    Running,

    /// Paused by a callback or by `Parser::pause()`. Resume with `Parser::resume()`.
    Paused,

    /// Paused because the message switched protocols. Resume with
    /// `Parser::resume_after_upgrade()`.
    PausedUpgrade,

    /// An error occurred. Only `Parser::reset()` recovers.
    Failed
}

impl fmt::Display for Control {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(match *self {
            Control::Running       => "running",
            Control::Paused        => "paused",
            Control::PausedUpgrade => "paused for upgrade",
            Control::Failed        => "failed"
        })
    }
}

/// A control operation was requested from a state that does not allow it.
#[derive(Clone,Copy,Debug,Eq,Error,PartialEq)]
#[error("cannot {operation} a parser that is {state}")]
pub struct ControlError {
    /// Requested operation.
    pub operation: &'static str,

    /// Control state at the time of the request.
    pub state: Control
}
