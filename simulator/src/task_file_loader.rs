//! TaskFileLoader - Implementação do WorkloadLoader que lê a carga de um
//! arquivo texto.
//!
//! Cada linha não vazia descreve um processo:
//!
//! ```text
//! <executável> <offset> <offset> ...
//! ```
//!
//! O nome do executável vira o id do processo, e o tamanho do arquivo do
//! executável no disco (caminho relativo ao diretório atual) é o tamanho
//! ocupado pelo processo. Os offsets são bytes, em decimal.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use log::debug;
use vm::{loader::WorkloadLoader, ProcessDescription};

#[derive(Debug)]
pub struct TaskFileLoader {
    path: PathBuf,
}

impl TaskFileLoader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        TaskFileLoader {
            path: path.as_ref().to_path_buf(),
        }
    }
}

/// Interpreta uma linha já sem espaços nas pontas. `footprint` diz quantos
/// bytes o executável ocupa.
fn parse_line<F>(line: &str, line_number: usize, footprint: F) -> Result<ProcessDescription>
where
    F: FnOnce(&str) -> Result<u64>,
{
    let mut tokens = line.split_whitespace();

    let name = tokens
        .next()
        .ok_or_else(|| anyhow!("line {}: missing executable name", line_number))?;

    let accesses = tokens
        .map(|token| {
            token
                .parse::<usize>()
                .with_context(|| format!("line {}: invalid access offset {:?}", line_number, token))
        })
        .collect::<Result<Vec<_>>>()?;

    let size = footprint(name).with_context(|| format!("line {}: process {}", line_number, name))?;
    let footprint_size = usize::try_from(size)
        .with_context(|| format!("line {}: executable {} is too large", line_number, name))?;

    Ok(ProcessDescription::new(name, footprint_size, accesses))
}

fn executable_size(name: &str) -> Result<u64> {
    let metadata = fs::metadata(name).with_context(|| format!("cannot stat executable {}", name))?;

    Ok(metadata.len())
}

/// Interpreta o conteúdo inteiro de um arquivo de tarefas.
pub fn parse_tasks<F>(content: &str, mut footprint: F) -> Result<Vec<ProcessDescription>>
where
    F: FnMut(&str) -> Result<u64>,
{
    content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line_number, line)| parse_line(line, line_number, &mut footprint))
        .collect()
}

impl WorkloadLoader for TaskFileLoader {
    type Error = anyhow::Error;

    fn load(&mut self) -> Result<Vec<ProcessDescription>> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read task file {}", self.path.display()))?;

        let descriptions = parse_tasks(&content, executable_size)?;

        debug!(
            "task_file_loader: {} processes read from {}",
            descriptions.len(),
            self.path.display()
        );

        Ok(descriptions)
    }
}
