#[derive(Eq, Hash, PartialEq, Debug, Clone, Copy)]
pub enum FtpCommand {
    USER,
    PASS,
    QUIT,
    PORT,
    PWD,
    LIST,
    CWD,
    MKD,
    RMD,
    DELE,
    RNFR,
    RNTO,
    RETR,
    STOR,
}

impl FtpCommand {
    pub fn from_verb(verb: &str) -> Option<FtpCommand> {
        match verb.to_ascii_uppercase().as_str() {
            "USER" => Some(FtpCommand::USER),
            "PASS" => Some(FtpCommand::PASS),
            "QUIT" => Some(FtpCommand::QUIT),
            "PORT" => Some(FtpCommand::PORT),
            "PWD" => Some(FtpCommand::PWD),
            "LIST" => Some(FtpCommand::LIST),
            "CWD" => Some(FtpCommand::CWD),
            "MKD" => Some(FtpCommand::MKD),
            "RMD" => Some(FtpCommand::RMD),
            "DELE" => Some(FtpCommand::DELE),
            "RNFR" => Some(FtpCommand::RNFR),
            "RNTO" => Some(FtpCommand::RNTO),
            "RETR" => Some(FtpCommand::RETR),
            "STOR" => Some(FtpCommand::STOR),
            _ => None,
        }
    }
}

/// Splits a control line into its upper-cased verb and the argument string.
///
/// The verb is the first whitespace-delimited token. The argument is the
/// remainder with leading whitespace removed; embedded spaces are kept, so
/// file names containing spaces survive. Returns `None` when the line holds
/// no verb at all.
pub fn parse_command_line(line: &str) -> Option<(String, String)> {
    let line = line.trim_start();
    if line.is_empty() {
        return None;
    }
    let (verb, arg) = match line.split_once(|c: char| c.is_ascii_whitespace()) {
        Some((verb, rest)) => (verb, rest.trim_start()),
        None => (line, ""),
    };
    Some((verb.to_ascii_uppercase(), arg.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_verb_and_argument() {
        let (verb, arg) = parse_command_line("RETR hello.txt").unwrap();
        assert_eq!(verb, "RETR");
        assert_eq!(arg, "hello.txt");
    }

    #[test]
    fn verb_comparison_is_case_insensitive() {
        let (verb, _) = parse_command_line("reTr hello.txt").unwrap();
        assert_eq!(verb, "RETR");
        assert_eq!(FtpCommand::from_verb("stor"), Some(FtpCommand::STOR));
    }

    #[test]
    fn argument_keeps_embedded_spaces() {
        let (verb, arg) = parse_command_line("STOR my summer photos.zip").unwrap();
        assert_eq!(verb, "STOR");
        assert_eq!(arg, "my summer photos.zip");
    }

    #[test]
    fn argument_is_left_trimmed() {
        let (_, arg) = parse_command_line("CWD    docs").unwrap();
        assert_eq!(arg, "docs");
    }

    #[test]
    fn bare_verb_has_empty_argument() {
        let (verb, arg) = parse_command_line("PWD").unwrap();
        assert_eq!(verb, "PWD");
        assert_eq!(arg, "");
    }

    #[test]
    fn empty_line_has_no_verb() {
        assert_eq!(parse_command_line(""), None);
        assert_eq!(parse_command_line("   "), None);
    }

    #[test]
    fn unknown_verbs_do_not_parse_as_commands() {
        assert_eq!(FtpCommand::from_verb("PASV"), None);
        assert_eq!(FtpCommand::from_verb("NOOP"), None);
        assert_eq!(FtpCommand::from_verb(""), None);
    }
}
