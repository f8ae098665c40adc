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

//! Finite state machine macros and enums.

use std::fmt;

/// Act on the `Signal` returned by `$call`.
///
/// `Signal::Continue` executes `$exec`. `Signal::Pause` exits with `Success::Paused`, and
/// `Signal::Abort` exits with an `ErrorKind::User` error naming `$function`.
///
/// `Signal::PauseUpgrade` and `Signal::SkipBody` only carry meaning when returned from
/// `on_headers_complete()`, which handles them itself. Everywhere else they degrade to
/// `Signal::Pause` and `Signal::Continue` respectively.
macro_rules! callback {
    ($context:expr, $function:ident, $call:expr, $exec:expr) => ({
        match $call {
            Signal::Continue | Signal::SkipBody => {
                $exec
            },
            Signal::Pause | Signal::PauseUpgrade => {
                exit_paused!($context);
            },
            Signal::Abort => {
                exit_abort!($context, $function);
            }
        }
    });
}

/// Execute data callback `$function` with `$data`, unless `$data` is empty, then execute `$exec`.
macro_rules! callback_data {
    ($handler:expr, $context:expr, $function:ident, $data:expr, $exec:expr) => ({
        let data = $data;

        if data.is_empty() {
            $exec
        } else {
            callback!($context, $function, $handler.$function(data), $exec);
        }
    });
}

/// Execute data callback `$function` with the marked slice and exit with `Success::Eos`.
macro_rules! callback_eos_expr {
    ($handler:expr, $context:expr, $function:ident) => ({
        callback_data!($handler, $context, $function, bs_slice!($context), {
            exit_eos!($context);
        });
    });
}

/// Execute data callback `$function` ignoring the last collected byte, and transition to
/// `$state`.
///
/// State is changed before the callback is executed, so that a pause resumes within `$state`.
macro_rules! callback_ignore_transition {
    ($parser:expr, $handler:expr, $context:expr, $function:ident, $state:ident) => ({
        set_state!($parser, $state);

        callback_data!($handler, $context, $function, bs_slice_ignore!($context), {
            transition!($parser, $context);
        });
    });
}

/// Execute notification callback `$function` and transition to `$state`.
macro_rules! callback_transition {
    ($parser:expr, $handler:expr, $context:expr, $function:ident, $state:ident) => ({
        set_state!($parser, $state);

        callback!($context, $function, $handler.$function(), {
            transition!($parser, $context);
        });
    });
}

/// Exit parser with an `ErrorKind::User` error for callback `$function`.
macro_rules! exit_abort {
    ($context:expr, $function:ident) => ({
        return Err(ParserError::new(
            ErrorKind::User,
            concat!("`", stringify!($function), "` callback error"),
            $context.stream_index
        ));
    });
}

/// Exit parser with `Success::Eos`.
macro_rules! exit_eos {
    ($context:expr) => ({
        return Ok(ParserValue::Exit(Success::Eos($context.stream_index)));
    });
}

/// Exit parser with a `ParserError` of `$kind`, reported on the most recently read byte.
macro_rules! exit_error {
    ($context:expr, $kind:ident, $reason:expr) => ({
        exit_error_at!($kind, $reason, $context.stream_index - 1);
    });
}

/// Exit parser with a `ParserError` of `$kind`, reported at `$offset`.
macro_rules! exit_error_at {
    ($kind:ident, $reason:expr, $offset:expr) => ({
        return Err(ParserError::new(ErrorKind::$kind, $reason, $offset));
    });
}

/// If the stream is EOS, exit with `Success::Eos`. Otherwise do nothing.
macro_rules! exit_if_eos {
    ($context:expr) => ({
        if bs_is_eos!($context) {
            exit_eos!($context);
        }
    });
}

/// Exit parser with `Success::Paused`.
macro_rules! exit_paused {
    ($context:expr) => ({
        return Ok(ParserValue::Exit(Success::Paused($context.stream_index)));
    });
}

/// Exit parser with `Success::PausedUpgrade`.
macro_rules! exit_upgrade {
    ($context:expr) => ({
        return Ok(ParserValue::Exit(Success::PausedUpgrade($context.stream_index)));
    });
}

/// Set state.
macro_rules! set_state {
    ($parser:expr, $state:ident) => ({
        $parser.state = ParserState::$state;
    });
}

/// Transition to `$state`.
macro_rules! transition {
    ($parser:expr, $context:expr, $state:ident) => ({
        set_state!($parser, $state);

        bs_mark!($context, $context.stream_index);

        return Ok(ParserValue::Continue);
    });

    ($parser:expr, $context:expr) => ({
        bs_mark!($context, $context.stream_index);

        return Ok(ParserValue::Continue);
    });
}

// -------------------------------------------------------------------------------------------------

/// Parsing function return values.
pub enum ParserValue {
    /// Continue the parser loop.
    Continue,

    /// Exit the parser loop.
    Exit(Success)
}

// -------------------------------------------------------------------------------------------------

/// Parsing function success return values.
#[derive(Clone,Copy,PartialEq)]
pub enum Success {
    /// Additional `stream` data is expected.
    ///
    /// # Arguments
    ///
    /// **(1)**: The amount of `stream` bytes that were processed. This value will always match
    ///          `stream.len()`.
    Eos(usize),

    /// Parsing was paused, either by a callback returning
    /// [`Signal::Pause`](../http1/enum.Signal.html#variant.Pause) or by a prior call to
    /// [`Parser::pause()`](../http1/struct.Parser.html#method.pause).
    ///
    /// # Arguments
    ///
    /// **(1)**: The offset where parsing stopped. Bytes from this offset on have not been
    ///          processed, and must be supplied again after
    ///          [`Parser::resume()`](../http1/struct.Parser.html#method.resume).
    Paused(usize),

    /// The message switched protocols.
    ///
    /// # Arguments
    ///
    /// **(1)**: The offset where the upgraded protocol begins. Bytes from this offset on belong
    ///          to the new protocol, and are never processed by the parser.
    PausedUpgrade(usize)
}

impl Success {
    /// Retrieve the offset carried by every variant.
    pub fn offset(&self) -> usize {
        match *self {
            Success::Eos(length)
            | Success::Paused(length)
            | Success::PausedUpgrade(length) => length
        }
    }
}

impl fmt::Debug for Success {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Success::Eos(length) => {
                write!(formatter, "Success::Eos({})", length)
            },
            Success::Paused(length) => {
                write!(formatter, "Success::Paused({})", length)
            },
            Success::PausedUpgrade(length) => {
                write!(formatter, "Success::PausedUpgrade({})", length)
            }
        }
    }
}

impl fmt::Display for Success {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}", self.offset())
    }
}
