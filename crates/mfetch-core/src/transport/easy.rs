//! libcurl-backed [`Transport`].

use curl::easy::Easy;
use std::io::{self, Write};
use std::time::Duration;

use super::{Transport, TransportError};
use crate::config::HttpConfig;

/// Blocking single-stream GET via a fresh curl Easy handle per request.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    http: HttpConfig,
}

impl CurlTransport {
    pub fn new(http: HttpConfig) -> Self {
        Self { http }
    }

    fn configure(&self, easy: &mut Easy, url: &str) -> Result<(), curl::Error> {
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.http.max_redirections)?;
        // >= 400 ends the transfer before the error page reaches the sink.
        easy.fail_on_error(true)?;
        easy.useragent(&self.http.user_agent)?;
        easy.connect_timeout(Duration::from_secs(self.http.connect_timeout_secs))?;
        easy.low_speed_limit(self.http.low_speed_limit_bytes)?;
        easy.low_speed_time(Duration::from_secs(self.http.low_speed_time_secs))?;
        easy.timeout(Duration::from_secs(self.http.timeout_secs))?;
        Ok(())
    }
}

impl Transport for CurlTransport {
    fn get(&self, url: &str, sink: &mut dyn Write) -> Result<u64, TransportError> {
        let mut easy = Easy::new();
        self.configure(&mut easy, url)?;

        let mut written = 0u64;
        let mut sink_err: Option<io::Error> = None;
        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match sink.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    sink_err = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.perform()
        };

        if let Some(e) = sink_err {
            return Err(TransportError::Sink(e));
        }
        if let Err(e) = performed {
            if e.is_http_returned_error() {
                let code = easy.response_code()?;
                return Err(TransportError::Http(code));
            }
            return Err(TransportError::Curl(e));
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(TransportError::Http(code));
        }
        tracing::debug!(url, code, bytes = written, "GET complete");
        Ok(written)
    }
}
