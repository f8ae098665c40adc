use http1_box::{ Control, Method, Parser, ParserState, ParserType, Signal, Success };

mod common;

use common::Recorder;

fn assert_upgrade(p: &mut Parser, r: &mut Recorder, stream: &[u8], offset: usize) {
    match p.execute(r, stream) {
        Ok(Success::PausedUpgrade(offset_)) => {
            assert_eq!(offset, offset_);
            assert_eq!(p.state(), ParserState::Upgrade);
            assert_eq!(p.control(), Control::PausedUpgrade);
            assert!(p.is_upgrading());
            assert!(p.upgrade());
        },
        result => panic!("execute() Ok(Success::PausedUpgrade) match failed: {:?}", result)
    }
}

#[test]
fn websocket() {
    let mut p  = Parser::request();
    let mut r  = Recorder::new();
    let stream = b"GET /chat HTTP/1.1\r\n\
                   Host: example.com\r\n\
                   Upgrade: websocket\r\n\
                   Connection: keep-alive, Upgrade\r\n\
                   \r\n\
                   \x81\x05hello";

    assert_upgrade(&mut p, &mut r, stream, stream.len() - 7);
    assert_eq!(r.names().last(), Some(&"message_complete"));

    // nothing is parsed until the upgrade is acknowledged
    assert_upgrade(&mut p, &mut r, &stream[stream.len() - 7..], 0);

    assert!(p.resume().is_err());
    assert!(p.resume_after_upgrade().is_ok());
    assert_eq!(p.control(), Control::Running);
    assert_eq!(p.state(), ParserState::MessageStart);

    match p.execute(&mut r, b"GET / HTTP/1.1\r\n\r\n") {
        Ok(Success::Eos(18)) => {},
        result => panic!("execute() Ok(Success::Eos) match failed: {:?}", result)
    }

    assert!(!p.upgrade());
    assert_eq!(r.data("message_complete").len(), 2);
}

#[test]
fn websocket_byte_at_a_time() {
    let mut p  = Parser::request();
    let mut r  = Recorder::new();
    let stream = b"GET /chat HTTP/1.1\r\nUpgrade: websocket\r\nConnection: upgrade\r\n\r\n";

    for byte in stream[..stream.len() - 1].iter() {
        match p.execute(&mut r, &[*byte]) {
            Ok(Success::Eos(1)) => {},
            result => panic!("execute() Ok(Success::Eos) match failed: {:?}", result)
        }
    }

    assert_upgrade(&mut p, &mut r, b"\n", 1);
}

#[test]
fn upgrade_without_connection_token() {
    let mut p = Parser::request();
    let mut r = Recorder::new();

    match p.execute(&mut r, b"GET / HTTP/1.1\r\nUpgrade: websocket\r\n\r\n") {
        Ok(Success::Eos(_)) => {},
        result => panic!("execute() Ok(Success::Eos) match failed: {:?}", result)
    }

    assert!(!p.upgrade());
    assert_eq!(p.state(), ParserState::MessageStart);
}

#[test]
fn upgrade_with_body() {
    let mut p  = Parser::request();
    let mut r  = Recorder::new();
    let stream = b"POST / HTTP/1.1\r\n\
                   Upgrade: h2c\r\n\
                   Connection: Upgrade\r\n\
                   Content-Length: 4\r\n\
                   \r\n\
                   bodyPRI";

    assert_upgrade(&mut p, &mut r, stream, stream.len() - 3);
    assert_eq!(r.data("body"), vec!["body"]);
}

#[test]
fn connect() {
    let mut p  = Parser::request();
    let mut r  = Recorder::new();
    let stream = b"CONNECT example.com:443 HTTP/1.1\r\n\
                   Host: example.com:443\r\n\
                   Content-Length: 10\r\n\
                   \r\n\
                   \x16\x03\x01";

    // the body of CONNECT is the tunnel
    assert_upgrade(&mut p, &mut r, stream, stream.len() - 3);
    assert_eq!(p.method(), Some(Method::Connect));
    assert_eq!(r.data("url"), vec!["example.com:443"]);
    assert!(r.data("body").is_empty());
}

#[test]
fn switching_protocols() {
    let mut p  = Parser::response();
    let mut r  = Recorder::new();
    let stream = b"HTTP/1.1 101 Switching Protocols\r\n\
                   Upgrade: websocket\r\n\
                   Connection: upgrade\r\n\
                   \r\n\
                   frames";

    assert_upgrade(&mut p, &mut r, stream, stream.len() - 6);
    assert_eq!(p.status_code(), Some(101));
}

#[test]
fn response_upgrade_headers_without_101() {
    let mut p = Parser::new(ParserType::Response);
    let mut r = Recorder::new();

    match p.execute(&mut r, b"HTTP/1.1 200 OK\r\nUpgrade: websocket\r\nConnection: upgrade\r\nContent-Length: 0\r\n\r\n") {
        Ok(Success::Eos(_)) => {},
        result => panic!("execute() Ok(Success::Eos) match failed: {:?}", result)
    }

    assert!(!p.upgrade());
    assert_eq!(p.state(), ParserState::MessageStart);
}

#[test]
fn pause_upgrade_from_headers_complete() {
    // response to a CONNECT request
    let mut p  = Parser::response();
    let mut r  = Recorder::new();
    let stream = b"HTTP/1.1 200 Connection Established\r\n\r\n\x16\x03\x03";

    r.headers_complete = Signal::PauseUpgrade;

    assert_upgrade(&mut p, &mut r, stream, stream.len() - 3);
    assert!(r.data("body").is_empty());
    assert!(p.finish(&mut r).is_ok());
}
