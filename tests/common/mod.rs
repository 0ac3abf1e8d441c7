#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};

use rustftpd::config::Config;
use rustftpd::core_auth::UserStore;
use rustftpd::server::FtpServer;

pub const USERS: &str = "alice,wonderland\nbob,builder\n";

pub struct TestServer {
    pub addr: SocketAddr,
    pub root: PathBuf,
    _tmp: tempfile::TempDir,
}

pub async fn start_server() -> TestServer {
    start_server_with(|_| {}).await
}

/// Boots a server in a fresh tempdir on ephemeral ports. The data source
/// port is 0 so the tests neither need root nor fight over port 20.
pub async fn start_server_with(tweak: impl FnOnce(&mut Config)) -> TestServer {
    let tmp = tempfile::tempdir().expect("tempdir");
    let users_file = tmp.path().join("users.csv");
    std::fs::write(&users_file, USERS).unwrap();

    let mut config = Config::default();
    config.server.listen_port = 0;
    config.server.data_source_port = 0;
    config.server.server_root = tmp.path().display().to_string();
    config.server.users_file = users_file.display().to_string();
    tweak(&mut config);

    let store = UserStore::load(Path::new(&config.server.users_file)).unwrap();
    let server = FtpServer::bind(config, store).await.unwrap();
    let addr = server.local_addr().unwrap();
    let root = tmp.path().canonicalize().unwrap();
    tokio::spawn(server.serve());

    TestServer {
        addr,
        root,
        _tmp: tmp,
    }
}

pub struct Client {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl Client {
    pub async fn connect(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).await.unwrap();
        let (read_half, writer) = stream.into_split();
        Self {
            reader: BufReader::new(read_half),
            writer,
        }
    }

    /// Connects and consumes the 220 greeting.
    pub async fn connect_ready(addr: SocketAddr) -> Self {
        let mut client = Self::connect(addr).await;
        assert_eq!(client.read_reply().await, "220 Service ready for new user.\r\n");
        client
    }

    pub async fn send(&mut self, line: &str) {
        self.writer
            .write_all(format!("{}\r\n", line).as_bytes())
            .await
            .unwrap();
    }

    /// Reads one reply line. An empty string means the server closed the
    /// control connection.
    pub async fn read_reply(&mut self) -> String {
        let mut line = String::new();
        self.reader.read_line(&mut line).await.unwrap();
        line
    }

    pub async fn cmd(&mut self, line: &str) -> String {
        self.send(line).await;
        self.read_reply().await
    }

    pub async fn login(&mut self, user: &str, pass: &str) {
        assert_eq!(
            self.cmd(&format!("USER {}", user)).await,
            "331 Username OK, need password.\r\n"
        );
        assert_eq!(
            self.cmd(&format!("PASS {}", pass)).await,
            "230 User logged in, proceed.\r\n"
        );
    }

    /// Binds a listener for the next data connection and announces it with
    /// PORT, asserting the 200.
    pub async fn declare_data_port(&mut self) -> TcpListener {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let reply = self
            .cmd(&format!("PORT 127,0,0,1,{},{}", port >> 8, port & 0xff))
            .await;
        assert_eq!(reply, "200 PORT command successful.\r\n");
        listener
    }
}
