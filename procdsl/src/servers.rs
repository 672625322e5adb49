use std::rc::Rc;

use crate::either::{self, Either, Exception};
use crate::fun::Fun;
use crate::option;

/// A fake server: its address and the greeting it answers with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConnection {
    pub ip: String,
    pub hello: String,
}

/// What a successful request returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerContent {
    pub ip: String,
    pub content: String,
}

const FIXTURE: &[(&str, &str)] = &[
    ("25.132.58.167", "hello"),
    ("81.106.142.123", "what's poppin'?"),
    ("214.98.39.99", "hey"),
    ("237.178.79.180", "wussup?"),
    ("5.7.136.67", "guten Tag"),
    ("168.195.1.137", "good night"),
    ("118.35.78.225", "aloha"),
    ("229.241.224.152", "salutations"),
    ("255.74.178.209", "what's the rumpus?"),
    ("137.81.12.199", "hola"),
];

/// A static, in-memory directory of servers, passed explicitly to whatever needs it.
///
/// Connecting fails for unknown addresses and for addresses ending in `9`;
/// requests fail for addresses starting with `2`.
#[derive(Debug, Clone)]
pub struct ServerDirectory {
    servers: Rc<[ServerConnection]>,
}

impl ServerDirectory {
    pub fn new(servers: Vec<ServerConnection>) -> Self {
        ServerDirectory {
            servers: servers.into(),
        }
    }

    /// The ten demo servers.
    pub fn fixture() -> Self {
        ServerDirectory::new(
            FIXTURE
                .iter()
                .map(|(ip, hello)| ServerConnection {
                    ip: ip.to_string(),
                    hello: hello.to_string(),
                })
                .collect(),
        )
    }

    pub fn servers(&self) -> &[ServerConnection] {
        &self.servers
    }

    pub fn find(&self, ip: &str) -> Option<&ServerConnection> {
        self.servers.iter().find(|s| s.ip == ip)
    }

    pub fn connect(&self) -> Fun<String, Option<ServerConnection>> {
        let directory = self.clone();
        Fun::new(move |ip: String| directory.check_connect(&ip).right())
    }

    pub fn get() -> Fun<ServerConnection, Option<ServerContent>> {
        Fun::new(|server: ServerConnection| check_request(server).right())
    }

    /// Connect, then request; `None` if either step fails.
    pub fn fetch(&self) -> Fun<String, Option<ServerContent>> {
        self.connect().then(option::bind(ServerDirectory::get()))
    }

    pub fn check_can_connect(&self) -> Fun<String, Exception<ServerConnection>> {
        let directory = self.clone();
        Fun::new(move |ip: String| directory.check_connect(&ip))
    }

    pub fn check_can_request() -> Fun<ServerConnection, Exception<ServerContent>> {
        Fun::new(check_request)
    }

    /// Like [`ServerDirectory::fetch`], but reports why it failed.
    pub fn fetch_checked(&self) -> Fun<String, Exception<ServerContent>> {
        self.check_can_connect()
            .then(either::bind_exception(ServerDirectory::check_can_request()))
    }

    fn check_connect(&self, ip: &str) -> Exception<ServerConnection> {
        match self.find(ip) {
            None => Either::Left("invalid ip".to_string()),
            Some(_) if ip.ends_with('9') => Either::Left("connection failed".to_string()),
            Some(server) => Either::Right(server.clone()),
        }
    }
}

fn check_request(server: ServerConnection) -> Exception<ServerContent> {
    if server.ip.starts_with('2') {
        Either::Left("network error".to_string())
    } else {
        Either::Right(ServerContent {
            ip: server.ip,
            content: server.hello,
        })
    }
}
