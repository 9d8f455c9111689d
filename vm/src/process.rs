use std::fmt;

use log::{debug, info, warn};

use crate::{
    constants::VmConfig,
    frame_pool::{AllocError, FramePool},
    frame_selector::FrameSelector,
    page_table::PageTable,
};

/// O que chega de fora sobre cada processo: nome, tamanho ocupado e a
/// sequência de offsets (em bytes) que ele vai acessar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessDescription {
    pub id: String,
    pub footprint_size: usize,
    pub accesses: Vec<usize>,
}

impl ProcessDescription {
    pub fn new(id: impl Into<String>, footprint_size: usize, accesses: Vec<usize>) -> Self {
        ProcessDescription {
            id: id.into(),
            footprint_size,
            accesses,
        }
    }
}

/// Quantas páginas cobrem `footprint_size` bytes.
///
/// Sempre soma uma página a mais, mesmo quando o tamanho é múltiplo exato
/// de `page_size` (e mesmo para tamanho zero). A validação dos acessos e a
/// admissão dependem dessa conta.
pub fn page_count_for(footprint_size: usize, page_size: usize) -> usize {
    footprint_size / page_size + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    InsufficientFrames,
}

/// Processo que não coube na memória. Não é fatal: a simulação segue sem ele.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub id: String,
    pub reason: RejectReason,
    pub required: usize,
    pub available: usize,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            RejectReason::InsufficientFrames => write!(
                f,
                "process {} needs {} frames but only {} are free",
                self.id, self.required, self.available
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionError {
    /// Algum acesso cai numa página fora do segmento do processo. A
    /// simulação inteira é abortada.
    AccessOutOfBounds { process_id: String, offset: usize },
    Alloc(AllocError),
}

impl fmt::Display for AdmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdmissionError::AccessOutOfBounds { process_id, offset } => write!(
                f,
                "exceeded program segment: process {} accesses offset {}",
                process_id, offset
            ),
            AdmissionError::Alloc(err) => write!(f, "frame allocation failed: {}", err),
        }
    }
}

impl std::error::Error for AdmissionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AdmissionError::Alloc(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AllocError> for AdmissionError {
    fn from(err: AllocError) -> Self {
        AdmissionError::Alloc(err)
    }
}

#[derive(Debug)]
pub enum Admission {
    Admitted(Process),
    Rejected(Rejection),
}

/// Um processo admitido, com sua tabela de páginas já preenchida.
#[derive(Debug, Clone)]
pub struct Process {
    pid: usize,
    id: String,
    page_size: usize,
    page_table: PageTable,
    accesses: Vec<usize>,
    cursor: usize,
    hit_count: usize,
    miss_count: usize,
    dispatch_count: usize,
    finished: bool,
}

impl Process {
    /// Decide se o processo entra na simulação.
    ///
    /// Todos os acessos são conferidos antes de olhar o espaço livre, então
    /// um acesso fora do segmento aborta tudo mesmo que o processo fosse ser
    /// rejeitado. Se houver frames suficientes, cada página `0..page_count`
    /// recebe um frame na ordem em que eles saem do pool.
    ///
    /// `pid` é a posição que o processo vai ocupar na carga; é ele, e não o
    /// nome, que identifica o processo na TLB.
    pub fn admit<S: FrameSelector>(
        pid: usize,
        description: ProcessDescription,
        pool: &mut FramePool,
        selector: &mut S,
        config: &VmConfig,
    ) -> Result<Admission, AdmissionError> {
        let ProcessDescription {
            id,
            footprint_size,
            accesses,
        } = description;

        let page_count = page_count_for(footprint_size, config.page_size);

        if let Some(&offset) = accesses
            .iter()
            .find(|&&offset| offset / config.page_size >= page_count)
        {
            return Err(AdmissionError::AccessOutOfBounds {
                process_id: id,
                offset,
            });
        }

        if !pool.has_enough_space(page_count) {
            let rejection = Rejection {
                id,
                reason: RejectReason::InsufficientFrames,
                required: page_count,
                available: pool.free_count(),
            };

            warn!("admission: {}", rejection);

            return Ok(Admission::Rejected(rejection));
        }

        let mut page_table = PageTable::with_capacity(page_count);

        for page_number in 0..page_count {
            let frame = pool.allocate_one(selector)?;
            debug!("admission: {} page {} -> frame {}", id, page_number, frame);
            page_table.push(frame);
        }

        info!(
            "admission: process {} (#{}) admitted with {} pages and {} accesses ({} frames free)",
            id,
            pid,
            page_count,
            accesses.len(),
            pool.free_count()
        );

        // Traço vazio não tem nada para despachar.
        let finished = accesses.is_empty();

        Ok(Admission::Admitted(Process {
            pid,
            id,
            page_size: config.page_size,
            page_table,
            accesses,
            cursor: 0,
            hit_count: 0,
            miss_count: 0,
            dispatch_count: 0,
            finished,
        }))
    }

    pub fn pid(&self) -> usize {
        self.pid
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn page_count(&self) -> usize {
        self.page_table.len()
    }

    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.accesses.len() - self.cursor
    }

    pub fn hit_count(&self) -> usize {
        self.hit_count
    }

    pub fn miss_count(&self) -> usize {
        self.miss_count
    }

    pub fn dispatch_count(&self) -> usize {
        self.dispatch_count
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Page number do próximo acesso, se ainda houver algum.
    pub(crate) fn next_page(&self) -> Option<usize> {
        self.accesses
            .get(self.cursor)
            .map(|offset| offset / self.page_size)
    }

    /// Avança o cursor e retorna `true` se o traço acabou.
    pub(crate) fn advance(&mut self) -> bool {
        self.cursor += 1;

        if self.cursor >= self.accesses.len() {
            self.finished = true;
        }

        self.finished
    }

    pub(crate) fn record_hit(&mut self) {
        self.hit_count += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.miss_count += 1;
    }

    pub(crate) fn record_dispatch(&mut self) {
        self.dispatch_count += 1;
    }
}
