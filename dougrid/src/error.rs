use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("The year `{0}` is neither \"all\" nor a valid year")]
    InvalidYear(String),
    #[error("Invalid image URL: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Client(#[from] douban_client::Error),

    #[error("IO Error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Network Error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),
}
