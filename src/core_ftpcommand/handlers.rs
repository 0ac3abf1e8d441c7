use tokio::net::tcp::OwnedWriteHalf;

use crate::config::Config;
use crate::core_auth::UserStore;
use crate::core_ftpcommand::ftpcommand::{parse_command_line, FtpCommand};
use crate::core_ftpcommand::{
    cwd, dele, list, mkd, pass, pwd, quit, retr, rmd, rnfr, rnto, stor, user,
};
use crate::core_network::port;
use crate::core_reply::send_response;
use crate::session::Session;

/// What the connection loop should do after a command was answered.
#[derive(Debug, PartialEq, Eq)]
pub enum SessionControl {
    Continue,
    Quit,
}

/// Routes one control line through the session state machine.
///
/// Exactly one reply is written per invocation (data-bearing commands write
/// their 150 and final reply inside the handler before returning). An `Err`
/// means the control channel itself failed and the session must be dropped.
pub async fn dispatch_command(
    line: &str,
    writer: &mut OwnedWriteHalf,
    config: &Config,
    store: &UserStore,
    session: &mut Session,
) -> Result<SessionControl, std::io::Error> {
    // A rename source only survives into the directly following command.
    let rename_src = session.pending_rename_src.take();

    let Some((verb, arg)) = parse_command_line(line) else {
        send_response(writer, b"500 Syntax error, command unrecognized.\r\n").await?;
        return Ok(SessionControl::Continue);
    };

    let Some(command) = FtpCommand::from_verb(&verb) else {
        if !verb.is_empty() && verb.bytes().all(|b| b.is_ascii_alphabetic()) {
            send_response(writer, b"202 Command not implemented.\r\n").await?;
        } else {
            send_response(writer, b"500 Syntax error, command unrecognized.\r\n").await?;
        }
        return Ok(SessionControl::Continue);
    };

    // Until login completes only the login dialogue itself is allowed.
    if !session.is_authenticated()
        && !matches!(
            command,
            FtpCommand::USER | FtpCommand::PASS | FtpCommand::QUIT
        )
    {
        send_response(writer, b"530 Not logged in.\r\n").await?;
        return Ok(SessionControl::Continue);
    }

    match command {
        FtpCommand::USER => user::handle_user_command(writer, store, session, arg).await?,
        FtpCommand::PASS => pass::handle_pass_command(writer, store, session, arg).await?,
        FtpCommand::QUIT => {
            quit::handle_quit_command(writer).await?;
            return Ok(SessionControl::Quit);
        }
        FtpCommand::PORT => port::handle_port_command(writer, session, arg).await?,
        FtpCommand::PWD => pwd::handle_pwd_command(writer, session).await?,
        FtpCommand::LIST => list::handle_list_command(writer, config, session).await?,
        FtpCommand::CWD => cwd::handle_cwd_command(writer, session, arg).await?,
        FtpCommand::MKD => mkd::handle_mkd_command(writer, session, arg).await?,
        FtpCommand::RMD => rmd::handle_rmd_command(writer, session, arg).await?,
        FtpCommand::DELE => dele::handle_dele_command(writer, session, arg).await?,
        FtpCommand::RNFR => rnfr::handle_rnfr_command(writer, session, arg).await?,
        FtpCommand::RNTO => rnto::handle_rnto_command(writer, session, arg, rename_src).await?,
        FtpCommand::RETR => retr::handle_retr_command(writer, config, session, arg).await?,
        FtpCommand::STOR => stor::handle_stor_command(writer, config, session, arg).await?,
    }

    Ok(SessionControl::Continue)
}
