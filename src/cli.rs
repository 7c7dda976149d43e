use clap::Parser;
use std::io::{BufRead, Write};
use std::net::IpAddr;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

const ADDRESS_PROMPT: &str = "Enter the IP address you would like to check: ";

#[derive(Parser, Debug)]
#[command(name = "minirep", author, version, about = "Look up IP reputation and recommend DROP, ALERT or PASS", long_about = None)]
pub struct Cli {
    /// IP address to check (prompted for when omitted)
    #[arg(short = 'a', long = "address", alias = "Address")]
    pub address: Option<String>,

    /// Config file (defaults to minirep.json beside the binary)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Malicious-vote count that raises an ALERT (overrides the config file)
    #[arg(short = 't', long = "threshold")]
    pub threshold: Option<u64>,
}

/// One canonical address, from the flag or an interactive prompt
pub fn resolve_address<R: BufRead, W: Write>(
    arg: Option<&str>,
    input: &mut R,
    prompt_out: &mut W,
) -> AppResult<IpAddr> {
    let raw = match arg {
        Some(value) => value.to_string(),
        None => prompt_address(input, prompt_out)?,
    };

    parse_address(&raw)
}

fn prompt_address<R: BufRead, W: Write>(input: &mut R, prompt_out: &mut W) -> AppResult<String> {
    write!(prompt_out, "{}", ADDRESS_PROMPT).map_err(AppError::Prompt)?;
    prompt_out.flush().map_err(AppError::Prompt)?;

    let mut line = String::new();
    input.read_line(&mut line).map_err(AppError::Prompt)?;
    Ok(line)
}

pub fn parse_address(raw: &str) -> AppResult<IpAddr> {
    let trimmed = raw.trim();
    trimmed.parse::<IpAddr>().map_err(|_| AppError::InvalidAddress {
        input: trimmed.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_flag_takes_precedence_over_prompt() {
        let mut input = Cursor::new("9.9.9.9\n");
        let mut out = Vec::new();

        let address = resolve_address(Some("1.1.1.1"), &mut input, &mut out).unwrap();
        assert_eq!(address, "1.1.1.1".parse::<IpAddr>().unwrap());
        assert!(out.is_empty());
    }

    #[test]
    fn test_prompt_reads_one_line() {
        let mut input = Cursor::new("  8.8.4.4  \nignored\n");
        let mut out = Vec::new();

        let address = resolve_address(None, &mut input, &mut out).unwrap();
        assert_eq!(address, "8.8.4.4".parse::<IpAddr>().unwrap());
        assert_eq!(String::from_utf8(out).unwrap(), ADDRESS_PROMPT);
    }

    #[test]
    fn test_ipv6_accepted() {
        let address = parse_address("2001:db8::1").unwrap();
        assert!(address.is_ipv6());
    }

    #[test]
    fn test_invalid_address_rejected() {
        for raw in ["", "example.com", "256.1.1.1", "1.2.3"] {
            let err = parse_address(raw).unwrap_err();
            assert!(matches!(err, AppError::InvalidAddress { .. }), "accepted {:?}", raw);
        }
    }

    #[test]
    fn test_empty_stdin_is_invalid() {
        let mut input = Cursor::new("");
        let mut out = Vec::new();

        let err = resolve_address(None, &mut input, &mut out).unwrap_err();
        assert!(matches!(err, AppError::InvalidAddress { .. }));
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["minirep", "-a", "1.2.3.4", "-c", "/tmp/m.json", "-t", "3"]);
        assert_eq!(cli.address.as_deref(), Some("1.2.3.4"));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/m.json")));
        assert_eq!(cli.threshold, Some(3));

        let cli = Cli::parse_from(["minirep", "--Address", "5.6.7.8"]);
        assert_eq!(cli.address.as_deref(), Some("5.6.7.8"));
    }
}
