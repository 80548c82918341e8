use pmossdp::{Headers, SsdpError, SsdpMessage, SsdpRequest, SsdpResponse};

/// Rendu texte tel qu'il circule sur le réseau
fn wire_text(message: &SsdpMessage) -> String {
    String::from_utf8(message.to_bytes()).unwrap()
}

#[test]
fn test_request_round_trip() {
    let request = SsdpRequest::new("NOTIFY")
        .with_uri("/upnp/notify")
        .with_headers(vec![
            ("HOST", "239.255.255.250:1900"),
            ("NT", "upnp:rootdevice"),
            ("NTS", "ssdp:alive"),
            ("USN", "uuid:5a3c::upnp:rootdevice"),
            ("NT", "duplicate names are kept"),
        ]);

    let parsed = SsdpMessage::parse(&wire_text(&request.clone().into())).unwrap();
    assert_eq!(parsed, SsdpMessage::Request(request));
}

#[test]
fn test_response_round_trip() {
    let response = SsdpResponse::new(200, "OK")
        .unwrap()
        .with_version("HTTP/1.0")
        .with_headers(vec![
            ("CACHE-CONTROL", "max-age=1800"),
            ("EXT", ""),
            ("LOCATION", "http://192.168.1.10:49152/description.xml"),
            ("ST", "urn:schemas-upnp-org:device:MediaRenderer:1"),
        ]);

    let parsed = SsdpMessage::parse(&wire_text(&response.clone().into())).unwrap();
    assert_eq!(parsed, SsdpMessage::Response(response));
}

#[test]
fn test_dispatch_on_http_prefix() {
    let inputs = [
        ("HTTP/1.1 200 OK\r\n\r\n", true),
        ("HTTP/1.0 404 NotFound", true),
        ("M-SEARCH * HTTP/1.1\r\nST: ssdp:all\r\n\r\n", false),
        ("NOTIFY * HTTP/1.1\r\n", false),
    ];
    for (raw, expect_response) in inputs {
        let message = SsdpMessage::parse(raw).unwrap();
        assert_eq!(message.as_response().is_some(), expect_response, "{raw:?}");
        assert_eq!(message.is_request(), !expect_response, "{raw:?}");
    }
}

#[test]
fn test_header_order_preserved() {
    let request = SsdpRequest::new("M-SEARCH")
        .with_headers([("ST", "upnp:rootdevice"), ("MX", "3")]);

    let text = request.to_string();
    assert!(text.find("ST:").unwrap() < text.find("MX:").unwrap());

    let parsed = SsdpRequest::parse(&text).unwrap();
    assert_eq!(
        parsed.headers.iter().collect::<Vec<_>>(),
        vec![("ST", "upnp:rootdevice"), ("MX", "3")]
    );
}

#[test]
fn test_crlf_conversion_leaves_no_bare_newline() {
    let request = SsdpRequest::new("NOTIFY").with_header("X-Multi", "first\nsecond\nthird");

    let text = request.to_string();
    let bytes = request.to_bytes();

    assert_eq!(bytes, text.replace('\n', "\r\n").into_bytes());
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'\n' {
            assert!(i > 0 && bytes[i - 1] == b'\r', "bare LF at offset {}", i);
        }
    }
}

#[test]
fn test_status_code_from_string_or_int() {
    assert_eq!(
        SsdpResponse::new("200", "OK").unwrap(),
        SsdpResponse::new(200, "OK").unwrap()
    );
}

#[test]
fn test_garbage_is_rejected() {
    assert!(matches!(
        SsdpMessage::parse("garbage"),
        Err(SsdpError::MalformedStartLine { .. })
    ));
    assert!(matches!(
        "HTTP/1.1 two-hundred OK".parse::<SsdpMessage>(),
        Err(SsdpError::InvalidStatusCode { .. })
    ));
    assert!(matches!(
        SsdpMessage::parse("NOTIFY * HTTP/1.1\r\nNT upnp:rootdevice\r\n"),
        Err(SsdpError::MalformedHeader { line_number: 2, .. })
    ));
}

#[test]
fn test_headers_from_mapping() {
    let mut map = std::collections::BTreeMap::new();
    map.insert("MX".to_string(), "3".to_string());
    map.insert("ST".to_string(), "ssdp:all".to_string());

    let request = SsdpRequest::new("M-SEARCH").with_headers(map);
    assert_eq!(request.headers, Headers::from([("MX", "3"), ("ST", "ssdp:all")]));
}

#[test]
fn test_parse_real_world_notify() {
    // Annonce typique d'un renderer, sans ligne vide finale
    let raw = "NOTIFY * HTTP/1.1\r\n\
               HOST: 239.255.255.250:1900\r\n\
               CACHE-CONTROL: max-age=1800\r\n\
               LOCATION: http://192.168.1.20:1400/xml/device_description.xml\r\n\
               NT: urn:schemas-upnp-org:device:ZonePlayer:1\r\n\
               NTS: ssdp:alive\r\n\
               SERVER: Linux UPnP/1.0 Sonos/70.3-35220 (ZPS1)\r\n\
               USN: uuid:RINCON_000E58::urn:schemas-upnp-org:device:ZonePlayer:1";

    let request = match SsdpMessage::parse(raw).unwrap() {
        SsdpMessage::Request(request) => request,
        other => panic!("expected a request, got {:?}", other),
    };
    assert_eq!(request.method, "NOTIFY");
    assert_eq!(request.headers.len(), 7);
    assert_eq!(request.headers.get("nts"), Some("ssdp:alive"));
    assert_eq!(
        request.headers.get("SERVER"),
        Some("Linux UPnP/1.0 Sonos/70.3-35220 (ZPS1)")
    );
}
