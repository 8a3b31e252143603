//! Interactive shell for channel operations and raw APDUs

use std::error::Error;
use std::io::{self, BufRead, Write};

use simterm_apdu_core::CardProcessor;
use simterm_terminal::Terminal;

use crate::utils::{self, display::response_lines};

const HELP: &str = "\
Commands:
  open [aid]  - Open a logical channel, selecting the AID when given
  close <n>   - Close logical channel n
  atr         - Display the card's ATR
  status      - Show card presence and open channels
  <hex>       - Send APDU command (e.g., '01A4040008A000000003000000')
  help        - Show this help
  exit        - Exit the shell";

/// Run the shell on stdin and stdout
pub(crate) fn shell_command<P: CardProcessor>(terminal: &Terminal<P>) -> Result<(), Box<dyn Error>> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_shell(terminal, stdin.lock(), stdout.lock())
}

/// Read commands from `input` until it ends or the user exits
pub(crate) fn run_shell<P, R, W>(
    terminal: &Terminal<P>,
    input: R,
    mut output: W,
) -> Result<(), Box<dyn Error>>
where
    P: CardProcessor,
    R: BufRead,
    W: Write,
{
    writeln!(
        output,
        "APDU Shell on {} - Enter commands or 'help' for assistance",
        terminal.name()
    )?;
    terminal.connect();

    let mut lines = input.lines();
    loop {
        write!(output, "> ")?;
        output.flush()?;

        let line = match lines.next() {
            Some(Ok(input)) => input,
            _ => break,
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let command = parts.next().unwrap_or_default().to_lowercase();
        let args: Vec<&str> = parts.collect();

        match command.as_str() {
            "exit" | "quit" | "q" => break,

            "help" | "?" => writeln!(output, "{HELP}")?,

            "atr" => writeln!(output, "ATR: {}", hex::encode_upper(terminal.atr()))?,

            "status" => {
                writeln!(output, "Card present: {}", terminal.is_card_present())?;
                for channel in terminal.channels().open_channels() {
                    let state = terminal
                        .channels()
                        .channel_state(channel)
                        .map_or_else(|| "unknown".to_string(), |s| s.to_string());
                    writeln!(output, "  channel {channel}: {state}")?;
                }
            }

            "open" => {
                let aid = match args.as_slice() {
                    [] => None,
                    aid => match utils::parse_hex(&aid.concat()) {
                        Ok(aid) => Some(aid),
                        Err(_) => {
                            writeln!(output, "Invalid AID format")?;
                            continue;
                        }
                    },
                };

                match terminal.open_logical_channel(aid.as_deref()) {
                    Ok(opened) => {
                        writeln!(output, "Opened channel {}", opened.channel)?;
                        write_response(&mut output, &opened.select_response)?;
                    }
                    Err(e) => writeln!(output, "Open failed: {e}")?,
                }
            }

            "close" => match args.as_slice() {
                [channel] => match channel.parse::<i32>() {
                    Ok(channel) => {
                        terminal.close_logical_channel(channel);
                        writeln!(output, "Closed channel {channel}")?;
                    }
                    Err(_) => writeln!(output, "Invalid channel number")?,
                },
                _ => writeln!(output, "Usage: close <channel>")?,
            },

            // Treat as raw APDU
            _ => match utils::parse_hex(input) {
                Ok(command) if command.len() < 4 => writeln!(output, "APDU command too short")?,
                Ok(command) => match terminal.transmit(&command) {
                    Ok(response) => write_response(&mut output, &response)?,
                    Err(e) => writeln!(output, "Command failed: {e}")?,
                },
                Err(_) => writeln!(output, "Invalid hex input")?,
            },
        }
    }

    terminal.disconnect();
    writeln!(output, "Goodbye!")?;
    Ok(())
}

fn write_response<W: Write>(output: &mut W, response: &[u8]) -> io::Result<()> {
    writeln!(output, "Response:")?;
    for (key, value) in response_lines(response) {
        writeln!(output, "  {key}: {value}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use simterm_apdu_core::Aid;
    use simterm_apdu_sim::{EchoApplet, MockCard};

    fn run(script: &str) -> (Terminal<MockCard>, String) {
        let terminal = Terminal::new(MockCard::new());
        terminal.install_applet(
            Aid::from_hex("A000000003000000").unwrap(),
            Box::new(EchoApplet::new()),
        );
        let mut output = Vec::new();
        run_shell(&terminal, script.as_bytes(), &mut output).unwrap();
        (terminal, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_open_transmit_close() {
        let (terminal, output) = run("open A0 00 00 00 03 00 00 00\n01B0000000\nclose 1\nexit\n");
        assert!(output.contains("Opened channel 1"));
        assert!(output.contains("Data: DEADC0DE01"));
        assert!(output.contains("Closed channel 1"));
        assert!(output.ends_with("Goodbye!\n"));
        assert!(terminal.channels().open_channels().is_empty());
    }

    #[test]
    fn test_errors_are_reported() {
        let (_, output) = run("open A0FF\nclose x\n00\nzz\nopen GG\n");
        assert!(output.contains("Open failed: Failed to select applet on channel 1"));
        assert!(output.contains("Invalid channel number"));
        assert!(output.contains("APDU command too short"));
        assert!(output.contains("Invalid hex input"));
        assert!(output.contains("Invalid AID format"));
    }

    #[test]
    fn test_status_and_atr() {
        let (_, output) = run("open\nstatus\natr\nhelp\n");
        assert!(output.contains("Card present: true"));
        assert!(output.contains("channel 1: open"));
        assert!(output.contains("ATR: 3B80800101"));
        assert!(output.contains("close <n>"));
    }
}
