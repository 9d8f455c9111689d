use log::info;

use crate::{
    constants::{ConfigError, VmConfig},
    dispatcher::{Dispatcher, RunSummary},
    frame_pool::FramePool,
    frame_selector::{FrameSelector, RandomFrameSelector},
    loader::{WorkloadError, WorkloadLoader},
    process::{Admission, AdmissionError, Process, ProcessDescription, Rejection},
    tlb::{Tlb, TranslationError},
};

/// Estatísticas finais de um processo admitido.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessReport {
    pub id: String,
    pub page_table: Vec<usize>,
    pub dispatch_count: usize,
    pub hit_count: usize,
    pub miss_count: usize,
}

impl From<&Process> for ProcessReport {
    fn from(process: &Process) -> Self {
        ProcessReport {
            id: process.id().to_string(),
            page_table: process.page_table().frames().to_vec(),
            dispatch_count: process.dispatch_count(),
            hit_count: process.hit_count(),
            miss_count: process.miss_count(),
        }
    }
}

/// Junta o pool de frames, os processos admitidos e a TLB.
///
/// Primeiro todos os processos passam por [`Mmu::admit`], depois
/// [`Mmu::run`] despacha até o fim, e por último [`Mmu::report`] devolve os
/// contadores.
pub struct Mmu<SELECTOR: FrameSelector = RandomFrameSelector> {
    config: VmConfig,
    frame_pool: FramePool,
    processes: Vec<Process>,
    tlb: Tlb,
    selector: SELECTOR,
}

impl<SELECTOR> Mmu<SELECTOR>
where
    SELECTOR: FrameSelector,
{
    pub fn new(config: VmConfig, selector: SELECTOR) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Mmu {
            config,
            frame_pool: FramePool::new(config.frame_count),
            processes: Vec::new(),
            tlb: Tlb::new(),
            selector,
        })
    }

    pub fn config(&self) -> &VmConfig {
        &self.config
    }

    pub fn frame_pool(&self) -> &FramePool {
        &self.frame_pool
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn tlb(&self) -> &Tlb {
        &self.tlb
    }

    /// Admite um processo. Se ele couber, passa a fazer parte da carga e
    /// recebe seus frames; se não, volta a rejeição e nada muda.
    pub fn admit(&mut self, description: ProcessDescription) -> Result<Option<Rejection>, AdmissionError> {
        let admission = Process::admit(
            self.processes.len(),
            description,
            &mut self.frame_pool,
            &mut self.selector,
            &self.config,
        )?;

        match admission {
            Admission::Admitted(process) => {
                self.processes.push(process);
                Ok(None)
            }
            Admission::Rejected(rejection) => Ok(Some(rejection)),
        }
    }

    /// Admite todos em ordem. Para no primeiro acesso fora do segmento; as
    /// rejeições por falta de frames são só acumuladas.
    pub fn admit_all<I>(&mut self, descriptions: I) -> Result<Vec<Rejection>, AdmissionError>
    where
        I: IntoIterator<Item = ProcessDescription>,
    {
        let mut rejections = Vec::new();

        for description in descriptions {
            if let Some(rejection) = self.admit(description)? {
                rejections.push(rejection);
            }
        }

        info!(
            "mmu: {} processes admitted, {} rejected, {} of {} frames in use",
            self.processes.len(),
            rejections.len(),
            self.frame_pool.allocated_count(),
            self.frame_pool.capacity()
        );

        Ok(rejections)
    }

    pub fn admit_from<L: WorkloadLoader>(
        &mut self,
        loader: &mut L,
    ) -> Result<Vec<Rejection>, WorkloadError<L::Error>> {
        let descriptions = loader.load().map_err(WorkloadError::Load)?;

        Ok(self.admit_all(descriptions)?)
    }

    /// Despacha em round-robin até todos os processos terminarem.
    pub fn run(&mut self) -> Result<RunSummary, TranslationError> {
        Dispatcher::new(self.config.quantum).run(&mut self.processes, &mut self.tlb)
    }

    pub fn is_complete(&self) -> bool {
        self.processes.iter().all(Process::is_finished)
    }

    pub fn report(&self) -> Vec<ProcessReport> {
        self.processes.iter().map(ProcessReport::from).collect()
    }
}
