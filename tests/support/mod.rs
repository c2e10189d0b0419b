#![allow(dead_code)]

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// One-shot HTTP token endpoint. Resolves to the raw request it received.
pub struct TokenServer {
    pub authority: String,
    request: JoinHandle<String>,
}

impl TokenServer {
    pub async fn respond(status_line: &'static str, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind token listener");
        let addr = listener.local_addr().expect("listener addr");

        let request = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.expect("accept token request");
            let request = read_request(&mut stream).await;

            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream
                .write_all(response.as_bytes())
                .await
                .expect("write token response");
            let _ = stream.shutdown().await;
            request
        });

        Self {
            authority: format!("http://{addr}"),
            request,
        }
    }

    pub async fn request(self) -> String {
        self.request.await.expect("token server task")
    }
}

async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0_u8; 4096];

    loop {
        let size = stream.read(&mut chunk).await.expect("read token request");
        if size == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..size]);

        let Some(header_end) = buf.windows(4).position(|window| window == b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
        let content_length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buf.len() >= header_end + 4 + content_length {
            break;
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}

/// One-shot ESMTP listener. Resolves to the commands it received and
/// whether the client closed the socket afterwards.
pub struct SmtpServer {
    pub port: u16,
    session: JoinHandle<SmtpTranscript>,
}

#[derive(Debug)]
pub struct SmtpTranscript {
    pub commands: Vec<String>,
    pub closed_by_client: bool,
}

impl SmtpServer {
    pub async fn start(extensions: &'static [&'static str], auth_reply: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind smtp listener");
        let port = listener.local_addr().expect("listener addr").port();

        let session = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("accept smtp client");
            let (reader, mut writer) = stream.into_split();
            let mut lines = BufReader::new(reader).lines();
            let mut commands = Vec::new();

            writer
                .write_all(b"220 localhost ESMTP test\r\n")
                .await
                .expect("write greeting");

            let closed_by_client = loop {
                let Some(line) = lines.next_line().await.expect("read smtp command") else {
                    break true;
                };
                let line = line.trim_end().to_string();
                let verb = line
                    .split_whitespace()
                    .next()
                    .unwrap_or_default()
                    .to_ascii_uppercase();
                commands.push(line);

                let reply = match verb.as_str() {
                    "EHLO" => ehlo_reply(extensions),
                    "AUTH" => format!("{auth_reply}\r\n"),
                    "QUIT" => "221 2.0.0 bye\r\n".to_string(),
                    _ => "250 2.0.0 OK\r\n".to_string(),
                };
                writer
                    .write_all(reply.as_bytes())
                    .await
                    .expect("write smtp reply");

                if verb == "QUIT" {
                    break matches!(lines.next_line().await, Ok(None) | Err(_));
                }
            };

            SmtpTranscript {
                commands,
                closed_by_client,
            }
        });

        Self { port, session }
    }

    pub async fn transcript(self) -> SmtpTranscript {
        self.session.await.expect("smtp server task")
    }
}

fn ehlo_reply(extensions: &[&str]) -> String {
    let mut reply = String::new();
    if extensions.is_empty() {
        reply.push_str("250 localhost\r\n");
        return reply;
    }

    reply.push_str("250-localhost\r\n");
    for (index, extension) in extensions.iter().enumerate() {
        let separator = if index + 1 == extensions.len() { ' ' } else { '-' };
        reply.push_str(&format!("250{separator}{extension}\r\n"));
    }
    reply
}
