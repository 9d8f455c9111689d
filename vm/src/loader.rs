use std::{convert::Infallible, fmt};

use crate::process::{AdmissionError, ProcessDescription};

/// De onde vêm as descrições dos processos (arquivo, memória, ...).
pub trait WorkloadLoader {
    type Error;

    fn load(&mut self) -> Result<Vec<ProcessDescription>, Self::Error>;
}

impl WorkloadLoader for Vec<ProcessDescription> {
    type Error = Infallible;

    fn load(&mut self) -> Result<Vec<ProcessDescription>, Self::Error> {
        Ok(std::mem::take(self))
    }
}

#[derive(Debug)]
pub enum WorkloadError<E> {
    /// O loader não conseguiu produzir as descrições.
    Load(E),
    Admission(AdmissionError),
}

impl<E: fmt::Display> fmt::Display for WorkloadError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkloadError::Load(err) => write!(f, "failed to load workload: {}", err),
            WorkloadError::Admission(err) => write!(f, "{}", err),
        }
    }
}

impl<E> std::error::Error for WorkloadError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WorkloadError::Load(err) => Some(err),
            WorkloadError::Admission(err) => Some(err),
        }
    }
}

impl<E> From<AdmissionError> for WorkloadError<E> {
    fn from(err: AdmissionError) -> Self {
        WorkloadError::Admission(err)
    }
}
