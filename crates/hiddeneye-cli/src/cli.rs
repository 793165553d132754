use std::path::PathBuf;

use clap::builder::NonEmptyStringValueParser;
use clap::{ArgGroup, Parser};
use hiddeneye_core::{EmbedOptions, EmbedStrategy};

use crate::commands::*;
use crate::CliResult;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["encode", "decode", "details"]),
))]
pub struct CliArgs {
    /// Encode mode, hides the message in the file
    #[arg(short, long, requires = "message")]
    pub encode: bool,

    /// Decode mode, unveils the message from the file
    #[arg(short, long)]
    pub decode: bool,

    /// Lists all markers of the file
    #[arg(short = 'i', long)]
    pub details: bool,

    /// The file to operate on, must be a jpeg
    #[arg(short, long, value_name = "jpeg file", required = true)]
    pub file: PathBuf,

    /// The message to encode
    #[arg(
        short,
        long,
        value_name = "text message",
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub message: Option<String>,

    /// Insert the comment behind the start of image instead of overwriting what is there
    #[arg(long, requires = "encode")]
    pub splice: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Mode {
    Encode { message: String },
    Decode,
    Details,
}

impl CliArgs {
    /// The selected mode, clap guarantees exactly one of them.
    pub fn mode(&self) -> Mode {
        match (&self.message, self.encode, self.decode) {
            (Some(message), true, _) => Mode::Encode {
                message: message.clone(),
            },
            (_, _, true) => Mode::Decode,
            _ => Mode::Details,
        }
    }

    pub fn options(&self) -> EmbedOptions {
        let strategy = if self.splice {
            EmbedStrategy::Splice
        } else {
            EmbedStrategy::Overwrite
        };

        EmbedOptions::default().with_strategy(strategy)
    }

    pub fn run(self) -> CliResult<()> {
        let options = self.options();
        match self.mode() {
            Mode::Encode { message } => encode::run(&self.file, &message, options),
            Mode::Decode => decode::run(&self.file),
            Mode::Details => details::run(&self.file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<CliArgs, clap::Error> {
        CliArgs::try_parse_from(std::iter::once("hiddeneye").chain(args.iter().copied()))
    }

    #[test]
    fn should_parse_encode() {
        let args = parse(&["-e", "-f", "cat.jpg", "-m", "hi"]).unwrap();

        assert_eq!(args.mode(), Mode::Encode { message: "hi".into() });
        assert_eq!(args.file, PathBuf::from("cat.jpg"));
        assert_eq!(args.options().strategy, EmbedStrategy::Overwrite);
    }

    #[test]
    fn should_parse_encode_with_splice() {
        let args = parse(&["--encode", "--file", "cat.jpg", "--message", "hi", "--splice"]).unwrap();

        assert_eq!(args.options().strategy, EmbedStrategy::Splice);
    }

    #[test]
    fn should_parse_decode_and_details() {
        assert_eq!(parse(&["-d", "-f", "cat.jpg"]).unwrap().mode(), Mode::Decode);
        assert_eq!(parse(&["-i", "-f", "cat.jpg"]).unwrap().mode(), Mode::Details);
    }

    #[test]
    fn should_require_a_file() {
        let err = parse(&["-d"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn should_require_a_message_when_encoding() {
        let err = parse(&["-e", "-f", "cat.jpg"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn should_reject_an_empty_message() {
        let err = parse(&["-e", "-f", "cat.jpg", "-m", ""]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn should_require_a_mode() {
        let err = parse(&["-f", "cat.jpg"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn should_reject_two_modes() {
        let err = parse(&["-e", "-d", "-f", "cat.jpg", "-m", "hi"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn should_reject_splice_without_encode() {
        let err = parse(&["-d", "-f", "cat.jpg", "--splice"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }
}
