//! Utility functions and types for the simterm CLI

pub(crate) mod display;

use std::error::Error;

use clap::Args;
use simterm_apdu_core::Aid;
use simterm_apdu_sim::{EchoApplet, MockCard, MockCardConfig};
use simterm_terminal::Terminal;
use tracing::debug;

/// AID installed when no `--applet` is given
pub(crate) const DEFAULT_APPLET_AID: &str = "A000000003000000";

/// Arguments describing the simulated card
#[derive(Args, Debug, Clone)]
pub(crate) struct CardArgs {
    /// Answer-to-reset in hex (default 3B80800101)
    #[arg(long, global = true)]
    pub(crate) atr: Option<String>,

    /// Number of logical channels the card supports, basic channel included
    #[arg(long, global = true, default_value_t = 20)]
    pub(crate) max_channels: u8,

    /// AID of an echo applet to install; may be repeated
    #[arg(long = "applet", global = true, default_values_t = [DEFAULT_APPLET_AID.to_string()])]
    pub(crate) applets: Vec<String>,
}

impl CardArgs {
    /// Parsed applet AIDs, in the order given
    pub(crate) fn applet_aids(&self) -> Result<Vec<Aid>, Box<dyn Error>> {
        self.applets
            .iter()
            .map(|aid| Aid::from_hex(aid).map_err(Into::into))
            .collect()
    }

    /// Card configuration described by the arguments
    pub(crate) fn card_config(&self) -> Result<MockCardConfig, Box<dyn Error>> {
        let mut config = MockCardConfig::new().with_max_logical_channels(self.max_channels);
        if let Some(atr) = &self.atr {
            config = config.with_atr(parse_hex(atr)?);
        }
        Ok(config)
    }

    /// Build a terminal over a mock card with echo applets installed
    pub(crate) fn build_terminal(&self) -> Result<Terminal<MockCard>, Box<dyn Error>> {
        let terminal = Terminal::new(MockCard::with_config(self.card_config()?));
        for aid in self.applet_aids()? {
            debug!(%aid, "Installing echo applet");
            terminal.install_applet(aid, Box::new(EchoApplet::new()));
        }
        Ok(terminal)
    }
}

/// Decode hex input, ignoring whitespace
pub(crate) fn parse_hex(input: &str) -> Result<Vec<u8>, Box<dyn Error>> {
    let cleaned: String = input.split_whitespace().collect();
    Ok(hex::decode(cleaned)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CardArgs {
        CardArgs {
            atr: None,
            max_channels: 20,
            applets: vec![DEFAULT_APPLET_AID.to_string()],
        }
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("00 A4 04 00").unwrap(), vec![0x00, 0xA4, 0x04, 0x00]);
        assert!(parse_hex("0G").is_err());
    }

    #[test]
    fn test_build_terminal() {
        let mut args = args();
        args.atr = Some("3B 01".to_string());
        let terminal = args.build_terminal().unwrap();
        assert_eq!(terminal.atr().as_ref(), &[0x3B, 0x01]);
        assert!(terminal.channels().processor().applets().contains(
            &[0xA0, 0x00, 0x00, 0x00, 0x03, 0x00, 0x00, 0x00]
        ));
    }

    #[test]
    fn test_invalid_applet_aid() {
        let mut args = args();
        args.applets = vec!["XYZ".to_string()];
        assert!(args.build_terminal().is_err());
    }
}
