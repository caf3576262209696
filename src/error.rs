/// Possible errors from the SHT4x driver.
#[derive(Debug, PartialEq, Eq)]
pub enum Sht4xError<E> {
    /// The command byte is not one of the nine recognized measurement modes.
    InvalidMode(u8),
    /// Checksum did not match the received data.
    ChecksumMismatch,
    /// Error from the I2C bus (read/write).
    I2cError(E),
}

impl<E> From<E> for Sht4xError<E> {
    fn from(value: E) -> Self {
        Self::I2cError(value)
    }
}
