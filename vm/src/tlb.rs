use std::fmt;

use log::debug;

use crate::page_table::PageTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlbEntry {
    /// Posição do processo na carga, não o nome: dois processos podem ter
    /// o mesmo executável.
    pub pid: usize,
    pub page_number: usize,
    pub frame_number: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Translation {
    Hit { frame: usize },
    Miss { frame: usize },
}

impl Translation {
    pub fn is_hit(&self) -> bool {
        matches!(self, Translation::Hit { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// A página não tem frame na tabela do processo.
    Unmapped { pid: usize, page_number: usize },
}

impl fmt::Display for TranslationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationError::Unmapped { pid, page_number } => write!(
                f,
                "page {} of process #{} is not mapped",
                page_number, pid
            ),
        }
    }
}

impl std::error::Error for TranslationError {}

/// TLB sem limite de tamanho e sem substituição.
///
/// Cada par (processo, página) entra uma única vez, no primeiro acesso, e
/// fica válido até o fim da simulação; as tabelas de página não mudam depois
/// da admissão, então nunca há o que invalidar.
#[derive(Debug, Clone, Default)]
pub struct Tlb {
    entries: Vec<TlbEntry>,
}

impl Tlb {
    pub fn new() -> Self {
        Tlb {
            entries: Vec::new(),
        }
    }

    /// Primeira entrada que casa com processo e página.
    pub fn lookup(&self, pid: usize, page_number: usize) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.pid == pid && entry.page_number == page_number)
            .map(|entry| entry.frame_number)
    }

    /// Traduz uma página. No miss, o mapeamento vem de `page_table` e é
    /// anotado no fim da TLB.
    pub fn translate(
        &mut self,
        pid: usize,
        page_number: usize,
        page_table: &PageTable,
    ) -> Result<Translation, TranslationError> {
        if let Some(frame) = self.lookup(pid, page_number) {
            debug!("tlb: hit process #{} page {:#X} -> frame {}", pid, page_number, frame);
            return Ok(Translation::Hit { frame });
        }

        let frame = page_table
            .frame_of(page_number)
            .ok_or(TranslationError::Unmapped { pid, page_number })?;

        debug!("tlb: miss process #{} page {:#X} -> frame {}", pid, page_number, frame);

        self.entries.push(TlbEntry {
            pid,
            page_number,
            frame_number: frame,
        });

        Ok(Translation::Miss { frame })
    }

    pub fn entries(&self) -> &[TlbEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
