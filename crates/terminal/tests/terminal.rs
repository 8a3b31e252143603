//! End-to-end tests of the terminal over a simulated card

mod common;

use std::sync::Arc;
use std::thread;

use bytes::Bytes;
use common::{
    Recording, TEST_AID, TEST_PAYLOAD, fixed_payload_response, terminal_with_test_applet, test_aid,
};
use hex_literal::hex;
use simterm_apdu_core::{CardError, LogicalChannel, StatusWord};
use simterm_apdu_sim::{EchoApplet, MockCard, MockCardConfig, ScriptedCard};
use simterm_terminal::{ChannelState, Error, ErrorKind, Terminal, TerminalConfig};

#[test]
fn test_open_select_transmit_close() {
    let terminal = terminal_with_test_applet();

    let opened = terminal.open_logical_channel(Some(&TEST_AID[..])).unwrap();
    assert_eq!(opened.channel.number(), 1);
    assert_eq!(opened.select_response, fixed_payload_response());
    assert_eq!(opened.payload(), TEST_PAYLOAD);
    assert_eq!(terminal.select_response(), Some(fixed_payload_response()));

    let response = terminal.transmit(&hex!("01CA9F7F00")).unwrap();
    assert_eq!(response.as_ref(), hex!("0102039000"));

    terminal.close_logical_channel(1);

    let commands = terminal.channels().processor().commands().to_vec();
    assert_eq!(commands, vec![
        Bytes::from_static(&hex!("0070000001")),
        Bytes::from_static(&hex!("01A4040008A000000003000000")),
        Bytes::from_static(&hex!("01CA9F7F00")),
        Bytes::from_static(&hex!("0170800100")),
    ]);
    assert!(terminal.channels().open_channels().is_empty());
}

#[test]
fn test_class_byte_for_every_channel() {
    let terminal = terminal_with_test_applet();

    let mut channels = Vec::new();
    for expected in 1..=19u8 {
        let opened = terminal.open_logical_channel(Some(&TEST_AID[..])).unwrap();
        assert_eq!(opened.channel.number(), expected);
        channels.push(opened.channel);
    }

    // All channels taken
    let err = terminal.open_logical_channel(None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ChannelOpen);
    assert_eq!(err.response().map(|r| r.as_ref()), Some(&hex!("6A81")[..]));

    for channel in &channels {
        terminal.close_logical_channel(channel.number().into());
    }

    let processor = terminal.channels().processor();
    for channel in channels {
        let n = channel.number();
        let cla = if n < 4 { n } else { 0x40 | (n - 4) };

        let select = processor
            .commands()
            .iter()
            .find(|c| c[1] == 0xA4 && c[0] == cla)
            .unwrap();
        assert_eq!(select[..5], [cla, 0xA4, 0x04, 0x00, 0x08]);

        let close = processor
            .commands()
            .iter()
            .find(|c| c[1] == 0x70 && c[2] == 0x80 && c[3] == n)
            .unwrap();
        assert_eq!(close.as_ref(), [cla, 0x70, 0x80, n, 0x00]);
    }
    assert!(processor.inner().is_channel_open(LogicalChannel::BASIC));
}

#[test]
fn test_unknown_aid_closes_channel() {
    let terminal = terminal_with_test_applet();

    let err = terminal
        .open_logical_channel(Some(&hex!("A0000000030000FF")[..]))
        .unwrap_err();
    match &err {
        Error::SelectFailure { channel, response, .. } => {
            assert_eq!(channel.number(), 1);
            assert_eq!(response.as_ref(), hex!("6A82"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.kind(), ErrorKind::Select);
    assert_eq!(err.status(), Some(StatusWord::new(0x6A, 0x82)));

    let processor = terminal.channels().processor();
    let closes: Vec<_> = processor
        .commands()
        .iter()
        .filter(|c| c[1] == 0x70 && c[2] == 0x80)
        .collect();
    assert_eq!(closes.len(), 1);
    assert_eq!(closes[0].as_ref(), hex!("0170800100"));
    assert!(!processor.inner().is_channel_open(LogicalChannel::new(1).unwrap()));
    drop(processor);

    assert!(terminal.select_response().is_none());
    assert!(terminal.channels().open_channels().is_empty());

    // The freed channel is handed out again
    let opened = terminal.open_logical_channel(None).unwrap();
    assert_eq!(opened.channel.number(), 1);
}

#[test]
fn test_close_twice_sends_two_commands() {
    let terminal = terminal_with_test_applet();
    let opened = terminal.open_logical_channel(None).unwrap();
    let n = i32::from(opened.channel.number());

    terminal.close_logical_channel(n);
    terminal.close_logical_channel(n);

    let processor = terminal.channels().processor();
    let closes = processor
        .commands()
        .iter()
        .filter(|c| c[..] == hex!("0170800100"))
        .count();
    assert_eq!(closes, 2);
}

#[test]
fn test_close_negative_channel_sends_nothing() {
    let terminal = terminal_with_test_applet();
    terminal.close_logical_channel(-1);
    assert!(terminal.channels().processor().commands().is_empty());
}

#[test]
fn test_open_response_decoding() {
    for n in [1u8, 3, 4, 12, 19] {
        let card = ScriptedCard::new().with_response(vec![n, 0x90, 0x00]);
        let terminal = Terminal::new(card);
        let opened = terminal.open_logical_channel(None).unwrap();
        assert_eq!(opened.channel.number(), n);
        assert_eq!(
            terminal.channels().channel_state(opened.channel),
            Some(ChannelState::Open)
        );
    }
}

#[test]
fn test_select_without_status_word_is_failure() {
    let card = ScriptedCard::new()
        .with_response(hex!("029000").to_vec())
        .with_response(hex!("0102039001").to_vec())
        .with_response(hex!("9000").to_vec());
    let terminal = Terminal::new(card);

    let err = terminal.open_logical_channel(Some(&TEST_AID[..])).unwrap_err();
    assert!(matches!(err, Error::SelectFailure { .. }));
    assert_eq!(err.status(), Some(StatusWord::new(0x90, 0x01)));
    let processor = terminal.channels().processor();
    assert_eq!(processor.commands()[2].as_ref(), hex!("0270800200"));
}

#[test]
fn test_card_removed() {
    let terminal = Terminal::new(MockCard::new());
    terminal.channels().processor().remove();

    assert!(!terminal.is_card_present());
    let err = terminal.open_logical_channel(None).unwrap_err();
    assert!(matches!(err, Error::Transmit(CardError::CardAbsent)));
    assert_eq!(err.kind(), ErrorKind::CardAbsent);

    terminal.channels().processor().insert();
    assert!(terminal.is_card_present());
    assert!(terminal.open_logical_channel(None).is_ok());
}

#[test]
fn test_configured_terminal() {
    let config = MockCardConfig::new()
        .with_atr(hex!("3B8F8001").to_vec())
        .with_max_logical_channels(2);
    let terminal = Terminal::with_config(
        MockCard::with_config(config),
        TerminalConfig::new().with_name("SIM1"),
    );
    terminal.install_applet(test_aid(), Box::new(EchoApplet::new()));

    assert_eq!(terminal.name(), "SIM1");
    assert_eq!(terminal.atr().as_ref(), hex!("3B8F8001"));

    let opened = terminal.open_logical_channel(Some(&TEST_AID[..])).unwrap();
    assert_eq!(opened.select_response.as_ref(), hex!("DEADC0DE019000"));
    assert!(terminal.open_logical_channel(None).is_err());
}

#[test]
fn test_concurrent_open_select() {
    let terminal = Arc::new(terminal_with_test_applet());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let terminal = Arc::clone(&terminal);
            thread::spawn(move || terminal.open_logical_channel(Some(&TEST_AID[..])).unwrap().channel)
        })
        .collect();

    let mut channels: Vec<u8> = handles
        .into_iter()
        .map(|h| h.join().unwrap().number())
        .collect();
    channels.sort_unstable();
    assert_eq!(channels, (1..=8).collect::<Vec<_>>());

    // Each SELECT directly follows the open that produced its channel
    let processor = terminal.channels().processor();
    for pair in processor.commands().chunks(2) {
        assert_eq!(pair[0].as_ref(), hex!("0070000001"));
        assert_eq!(pair[1][1], 0xA4);
    }
}

#[test]
fn test_recording_passes_through() {
    let recording = Recording::new(MockCard::new());
    let terminal = Terminal::new(recording);
    assert_eq!(terminal.atr().as_ref(), hex!("3B80800101"));
    assert!(terminal.is_card_present());
}
