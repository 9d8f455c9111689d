use std::fmt;

/// Tamanho de uma página (e de um frame), em bytes.
pub const PAGE_SIZE: usize = 4096;

/// Quantidade de frames físicos disponíveis.
pub const FRAME_COUNT: usize = 250;

/// Quantos acessos um processo faz por vez antes de ceder a vez.
pub const ACCESS_QUANTUM: usize = 5;

/// Limite para `VmConfig::frame_count`; o pool guarda um `bool` por frame.
pub const MAX_FRAME_COUNT: usize = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    ZeroPageSize,
    ZeroFrameCount,
    TooManyFrames { requested: usize },
    ZeroQuantum,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroPageSize => write!(f, "page size must be greater than zero"),
            ConfigError::ZeroFrameCount => write!(f, "frame count must be greater than zero"),
            ConfigError::TooManyFrames { requested } => write!(
                f,
                "frame count {} exceeds the maximum of {}",
                requested, MAX_FRAME_COUNT
            ),
            ConfigError::ZeroQuantum => write!(f, "access quantum must be greater than zero"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parâmetros da simulação. O padrão corresponde às constantes acima.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VmConfig {
    pub page_size: usize,
    pub frame_count: usize,
    pub quantum: usize,
}

impl VmConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.frame_count == 0 {
            return Err(ConfigError::ZeroFrameCount);
        }
        if self.frame_count > MAX_FRAME_COUNT {
            return Err(ConfigError::TooManyFrames {
                requested: self.frame_count,
            });
        }
        if self.quantum == 0 {
            return Err(ConfigError::ZeroQuantum);
        }

        Ok(())
    }
}

impl Default for VmConfig {
    fn default() -> Self {
        VmConfig {
            page_size: PAGE_SIZE,
            frame_count: FRAME_COUNT,
            quantum: ACCESS_QUANTUM,
        }
    }
}
