//! One-shot channel commands

use std::error::Error;

use simterm_apdu_core::prelude::*;
use simterm_apdu_sim::MockCard;
use simterm_terminal::Terminal;
use tracing::{debug, info};

use crate::utils::display::{key_value_box, response_lines, section_title, success, warning};
use crate::utils::{self, DEFAULT_APPLET_AID};

/// Print the answer-to-reset
pub(crate) fn atr_command(terminal: &Terminal<MockCard>) -> Result<(), Box<dyn Error>> {
    println!(
        "{}",
        key_value_box(
            "Card",
            vec![
                ("Terminal", terminal.name().to_string()),
                ("ATR", hex::encode_upper(terminal.atr())),
                ("Present", terminal.is_card_present().to_string()),
            ]
        )
    );
    Ok(())
}

/// Open a logical channel and report it; the channel is closed again on exit
pub(crate) fn open_command(
    terminal: &Terminal<MockCard>,
    aid: Option<&String>,
) -> Result<(), Box<dyn Error>> {
    let aid = aid.map(|aid| utils::parse_hex(aid)).transpose()?;
    let opened = terminal.open_logical_channel(aid.as_deref())?;

    info!(channel = %opened.channel, "Logical channel opened");
    println!("{}", success(&format!("Opened logical channel {}", opened.channel)));
    println!(
        "{}",
        key_value_box("Select response", response_lines(&opened.select_response))
    );

    terminal.close_logical_channel(opened.channel.number().into());
    Ok(())
}

/// Send one APDU, optionally on a channel opened for `aid`
pub(crate) fn transmit_command(
    terminal: &Terminal<MockCard>,
    aid: Option<&String>,
    apdu: &str,
) -> Result<(), Box<dyn Error>> {
    let command = utils::parse_hex(apdu)?;

    let Some(aid) = aid else {
        let response = terminal.transmit(&command)?;
        println!("{}", key_value_box("Response", response_lines(&response)));
        return Ok(());
    };

    let aid = utils::parse_hex(aid)?;
    let opened = terminal.open_logical_channel(Some(aid.as_slice()))?;

    // Address the command to the channel just opened
    let command = Command::from_bytes(&command)?
        .with_class(opened.channel.class_byte())
        .to_bytes();
    debug!(channel = %opened.channel, command = %hex::encode_upper(&command), "Sending on channel");

    let result = terminal.transmit(&command);
    terminal.close_logical_channel(opened.channel.number().into());

    println!("{}", key_value_box("Response", response_lines(&result?)));
    Ok(())
}

/// End-to-end walk through the terminal surface
pub(crate) fn demo_command(
    terminal: &Terminal<MockCard>,
    aids: &[Aid],
) -> Result<(), Box<dyn Error>> {
    let default_aid = Aid::from_hex(DEFAULT_APPLET_AID)?;
    let aid = aids.first().unwrap_or(&default_aid);

    terminal.connect();

    println!("{}", section_title("Card"));
    atr_command(terminal)?;

    println!("{}", section_title("Open and select"));
    let opened = terminal.open_logical_channel(Some(aid.as_bytes()))?;
    println!(
        "{}",
        success(&format!("Selected {aid} on logical channel {}", opened.channel))
    );
    println!(
        "{}",
        key_value_box("Select response", response_lines(&opened.select_response))
    );

    println!("{}", section_title("Transmit"));
    let command = Command::new_with_le(opened.channel.class_byte(), 0xCA, 0x00, 0x00, 0x00);
    let response = terminal.transmit(&command.to_bytes())?;
    println!(
        "{}",
        key_value_box(
            &format!("GET DATA on channel {}", opened.channel),
            response_lines(&response)
        )
    );

    println!("{}", section_title("Unknown applet"));
    match terminal.open_logical_channel(Some(&[0xA0, 0x00, 0x00, 0x00, 0x00][..])) {
        Ok(unexpected) => {
            println!("{}", warning("Unregistered AID was selected"));
            terminal.close_logical_channel(unexpected.channel.number().into());
        }
        Err(e) => println!("{}", success(&format!("Rejected as expected: {e}"))),
    }

    println!("{}", section_title("Close"));
    terminal.close_logical_channel(opened.channel.number().into());
    println!("{}", success(&format!("Closed logical channel {}", opened.channel)));

    terminal.disconnect();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use simterm_apdu_sim::EchoApplet;

    fn terminal() -> (Terminal<MockCard>, Aid) {
        let terminal = Terminal::new(MockCard::new());
        let aid = Aid::from_hex(DEFAULT_APPLET_AID).unwrap();
        terminal.install_applet(aid.clone(), Box::new(EchoApplet::new()));
        (terminal, aid)
    }

    #[test]
    fn test_open_command_leaves_no_channel() {
        let (terminal, _) = terminal();
        open_command(&terminal, Some(&DEFAULT_APPLET_AID.to_string())).unwrap();
        assert!(terminal.channels().open_channels().is_empty());
        assert!(open_command(&terminal, Some(&"A0FF".to_string())).is_err());
    }

    #[test]
    fn test_transmit_on_opened_channel() {
        let (terminal, _) = terminal();
        transmit_command(&terminal, Some(&DEFAULT_APPLET_AID.to_string()), "00B0000000").unwrap();
        assert!(terminal.channels().open_channels().is_empty());

        // Basic channel has nothing selected, the card answers 69 86 and that is not an error
        transmit_command(&terminal, None, "00B0000000").unwrap();
    }

    #[test]
    fn test_demo_runs() {
        let (terminal, aid) = terminal();
        demo_command(&terminal, &[aid]).unwrap();
        assert!(terminal.channels().open_channels().is_empty());
    }
}
