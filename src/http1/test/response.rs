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

use crate::http1::test::*;

macro_rules! setup {
    () => (
        http1_setup!(Response)
    );
}

#[test]
fn status_line() {
    let (mut p, mut h) = setup!();

    assert_eos(
        &mut p,
        &mut h,
        b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n",
        ParserState::MessageStart
    );

    assert_eq!(
        h.events,
        vec![Event::MessageBegin,
             Event::Status("Not Found".to_string()),
             Event::HeaderField("Content-Length".to_string()),
             Event::HeaderValue("0".to_string()),
             Event::HeadersComplete,
             Event::MessageComplete]
    );

    assert_eq!(p.status_code(), Some(404));
    assert_eq!(p.http_major(), Some(1));
    assert_eq!(p.http_minor(), Some(1));
    assert_eq!(p.method(), None);
}

#[test]
fn status_fragmented() {
    let (mut p, mut h) = setup!();

    assert_eos(&mut p, &mut h, b"HTTP/1.1 2", ParserState::ResponseStatusCode);
    assert_eos(&mut p, &mut h, b"00 O", ParserState::ResponseStatus);
    assert_eos(&mut p, &mut h, b"K\r", ParserState::InitialLf);

    assert_eq!(p.status_code(), Some(200));
    assert_eq!(h.events, vec![Event::MessageBegin, Event::Status("OK".to_string())]);
}

#[test]
fn status_empty_reason() {
    let (mut p, mut h) = setup!();

    assert_eos(&mut p, &mut h, b"HTTP/1.1 200\r\n", ParserState::HeaderFieldStart);
    assert_eq!(h.events, vec![Event::MessageBegin]);

    let (mut p, mut h) = setup!();

    assert_eos(&mut p, &mut h, b"HTTP/1.1 200 \r\n", ParserState::HeaderFieldStart);
    assert_eq!(h.events, vec![Event::MessageBegin]);
}

#[test]
fn status_code_invalid() {
    let (mut p, mut h) = setup!();

    assert_error(&mut p, &mut h, b"HTTP/1.1 2x0 OK\r\n", ErrorKind::InvalidStatus, 10);

    let (mut p, mut h) = setup!();

    assert_error(&mut p, &mut h, b"HTTP/1.1 2000 OK\r\n", ErrorKind::InvalidStatus, 12);

    let (mut p, mut h) = setup!();

    assert_error(&mut p, &mut h, b"HTTP/1.1 200 O\x01K\r\n", ErrorKind::InvalidStatus, 14);
}

#[test]
fn protocol_invalid() {
    let (mut p, mut h) = setup!();

    assert_error(&mut p, &mut h, b"GET / HTTP/1.1\r\n", ErrorKind::InvalidConstant, 0);

    let (mut p, mut h) = setup!();

    assert_error(&mut p, &mut h, b"HTTP/1.1\r\n", ErrorKind::InvalidVersion, 8);
}

#[test]
fn body_until_eof() {
    let (mut p, mut h) = setup!();

    assert_eos(&mut p, &mut h, b"HTTP/1.1 200 OK\r\n\r\nhello", ParserState::BodyIdentityEof);

    assert!(p.message_needs_eof());
    assert!(!p.should_keep_alive());

    assert_eos(&mut p, &mut h, b" world", ParserState::BodyIdentityEof);
    assert_eq!(h.count(&Event::MessageComplete), 0);

    assert!(p.finish(&mut h).is_ok());
    assert_eq!(p.state(), ParserState::Closed);
    assert_eq!(h.body(), "hello world");
    assert_eq!(h.count(&Event::MessageComplete), 1);

    // finishing again at a message boundary has no effect
    assert!(p.finish(&mut h).is_ok());
    assert_eq!(h.count(&Event::MessageComplete), 1);
}

#[test]
fn bodyless_status() {
    for status in [b"100", b"101", b"199", b"204", b"304"].iter() {
        let (mut p, mut h) = setup!();
        let mut stream     = b"HTTP/1.1 ".to_vec();

        stream.extend_from_slice(&status[..]);
        stream.extend_from_slice(b" X\r\nContent-Length: 10\r\n\r\n");

        assert_eos(&mut p, &mut h, &stream, ParserState::MessageStart);
        assert_eq!(h.count(&Event::MessageComplete), 1);
        assert_eq!(h.body(), "");
        assert!(!p.message_needs_eof());
    }
}

#[test]
fn skip_body() {
    // response to a HEAD request
    let (mut p, _) = setup!();
    let mut h      = DebugHandler::with_signal(Callback::HeadersComplete, Signal::SkipBody);

    assert_eos(
        &mut p,
        &mut h,
        b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nHTTP/1.1 204 No Content\r\n\r\n",
        ParserState::MessageStart
    );

    assert_eq!(h.count(&Event::MessageComplete), 2);
    assert_eq!(h.body(), "");
    assert_eq!(p.status_code(), Some(204));
}

#[test]
fn http_1_0_closes() {
    let (mut p, mut h) = setup!();

    assert_eos(
        &mut p,
        &mut h,
        b"HTTP/1.0 200 OK\r\nContent-Length: 2\r\n\r\nok",
        ParserState::Closed
    );

    assert!(!p.should_keep_alive());
    assert_eq!(h.body(), "ok");

    assert_error(&mut p, &mut h, b"HTTP/1.0 200 OK\r\n", ErrorKind::ClosedConnection, 0);
}

#[test]
fn finish_incomplete() {
    let (mut p, mut h) = setup!();

    assert_eos(&mut p, &mut h, b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nab", ParserState::BodyIdentity);

    match p.finish(&mut h) {
        Err(error) => {
            assert_eq!(error.kind, ErrorKind::InvalidEofState);
            assert_eq!(p.state(), ParserState::Dead);
        },
        result => panic!("finish() Err() match failed: {:?}", result)
    }
}

#[test]
fn body_content_length() {
    let (mut p, mut h) = setup!();

    assert_eos(
        &mut p,
        &mut h,
        b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nhello",
        ParserState::MessageStart
    );

    assert_eq!(p.content_length(), Some(5));
    assert_eq!(h.count(&Event::Body("hello".to_string())), 1);
    assert_eq!(h.events.last(), Some(&Event::MessageComplete));
}
