use crate::error::TransportError;
use crate::remote::Transport;
use crate::settings::Settings;
use std::io::Read;
use suppaftp::types::FileType;
use suppaftp::{FtpError, FtpStream, Status};

/// [`Transport`] over a plain ftp control connection
pub struct FtpTransport {
    stream: FtpStream,
}

impl FtpTransport {
    /// connect and log in, transfers are switched to binary mode
    pub fn connect(settings: &Settings) -> Result<Self, TransportError> {
        let mut stream =
            FtpStream::connect((settings.host.as_str(), settings.port)).map_err(map_error)?;
        stream
            .login(settings.user.as_str(), settings.password().as_str())
            .map_err(map_error)?;
        stream.transfer_type(FileType::Binary).map_err(map_error)?;
        Ok(Self { stream })
    }

    pub fn welcome(&self) -> Option<&str> {
        self.stream.get_welcome_msg()
    }
}

/// 550 (file unavailable) is how servers report a missing file or dir
fn map_error(e: FtpError) -> TransportError {
    match e {
        FtpError::UnexpectedResponse(ref response)
            if matches!(response.status, Status::FileUnavailable) =>
        {
            TransportError::NotFound(e.to_string())
        }
        e => TransportError::Failed(e.to_string()),
    }
}

impl Transport for FtpTransport {
    fn cwd(&mut self, path: &str) -> Result<(), TransportError> {
        self.stream.cwd(path).map_err(map_error)
    }

    fn pwd(&mut self) -> Result<String, TransportError> {
        self.stream.pwd().map_err(map_error)
    }

    fn mkdir(&mut self, name: &str) -> Result<(), TransportError> {
        self.stream.mkdir(name).map_err(map_error)
    }

    fn remove(&mut self, name: &str) -> Result<(), TransportError> {
        self.stream.rm(name).map_err(map_error)
    }

    fn store(&mut self, name: &str, mut reader: &mut dyn Read) -> Result<u64, TransportError> {
        self.stream.put_file(name, &mut reader).map_err(map_error)
    }

    fn quit(&mut self) -> Result<(), TransportError> {
        self.stream.quit().map_err(map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use suppaftp::types::Response;

    fn reply(status: Status, body: &str) -> FtpError {
        FtpError::UnexpectedResponse(Response::new(status, body.as_bytes().to_vec()))
    }

    #[test]
    fn test_file_unavailable_maps_to_not_found() {
        let err = map_error(reply(Status::FileUnavailable, "550 No such file or directory"));
        assert!(matches!(err, TransportError::NotFound(_)), "got {err:?}");
    }

    #[test]
    fn test_other_reply_maps_to_failed() {
        let err = map_error(reply(Status::NotLoggedIn, "530 Login incorrect"));
        assert!(matches!(err, TransportError::Failed(_)), "got {err:?}");
    }
}
