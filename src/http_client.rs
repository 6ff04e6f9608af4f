//! HTTP agent construction and bounded response reading.

use std::io::{self, Read};
use std::time::Duration;

/// Socket timeouts applied to every request made by an agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeouts {
    pub connect: Duration,
    pub read: Duration,
    pub write: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            read: Duration::from_secs(30),
            write: Duration::from_secs(30),
        }
    }
}

/// Build an agent with consistent timeouts. Agents are cheap to clone and
/// share their connection pool.
pub(crate) fn agent(timeouts: Timeouts) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(timeouts.connect)
        .timeout_read(timeouts.read)
        .timeout_write(timeouts.write)
        .build()
}

/// Read a response into memory, enforcing a maximum byte size.
pub(crate) fn read_response_bytes(
    response: ureq::Response,
    max_bytes: usize,
) -> Result<Vec<u8>, io::Error> {
    check_content_length(&response, max_bytes)?;
    let mut limited = response.into_reader().take(max_bytes as u64 + 1);
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes)?;
    if bytes.len() > max_bytes {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Response exceeded {max_bytes} bytes"),
        ));
    }
    Ok(bytes)
}

fn check_content_length(response: &ureq::Response, max_bytes: usize) -> Result<(), io::Error> {
    let Some(length) = response.header("Content-Length") else {
        return Ok(());
    };
    let Ok(length) = length.parse::<u64>() else {
        return Ok(());
    };
    if length > max_bytes as u64 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Response too large: {length} bytes"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::net::TcpListener;
    use std::thread;

    fn serve_once(response: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{addr}")
    }

    #[test]
    fn rejects_content_length_over_max() {
        let url = serve_once("HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\nok".to_string());
        let response = agent(Timeouts::default()).get(&url).call().unwrap();
        let err = read_response_bytes(response, 10).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn rejects_body_over_max_without_length() {
        let body = "a".repeat(32);
        let url = serve_once(format!("HTTP/1.0 200 OK\r\n\r\n{body}"));
        let response = agent(Timeouts::default()).get(&url).call().unwrap();
        let err = read_response_bytes(response, 16).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn accepts_body_under_limit() {
        let body = "{\"count\":0}";
        let url = serve_once(format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        ));
        let response = agent(Timeouts::default()).get(&url).call().unwrap();
        let bytes = read_response_bytes(response, 64).unwrap();
        assert_eq!(bytes, body.as_bytes());
    }
}
