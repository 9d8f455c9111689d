use log::{info, trace};

use crate::{
    process::Process,
    tlb::{Tlb, TranslationError},
};

/// Resultado de uma vez na fila.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// O processo já tinha terminado; a vez é consumida sem efeito.
    Skipped,
    Ran { accesses: usize, finished: bool },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Chamadas de dispatch, contando as vezes de processos já terminados.
    pub turns: usize,
    /// Acessos traduzidos no total.
    pub accesses: usize,
}

/// Escalonador round-robin com quantum fixo de acessos.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher {
    quantum: usize,
}

impl Dispatcher {
    pub fn new(quantum: usize) -> Self {
        Dispatcher { quantum }
    }

    /// Dá a vez ao processo `turn`: até `quantum` acessos seguidos, parando
    /// antes se o traço acabar. `turn` precisa ser uma posição válida em
    /// `processes`; quem garante isso é [`Dispatcher::run`].
    pub(crate) fn dispatch(
        &self,
        processes: &mut [Process],
        turn: usize,
        tlb: &mut Tlb,
    ) -> Result<DispatchOutcome, TranslationError> {
        let process = &mut processes[turn];

        if process.is_finished() {
            return Ok(DispatchOutcome::Skipped);
        }

        process.record_dispatch();
        trace!("dispatcher: turn {} to {} (cursor {})", turn, process.id(), process.cursor());

        let mut accesses = 0;

        while accesses < self.quantum {
            let Some(page_number) = process.next_page() else {
                break;
            };

            let translation = tlb.translate(process.pid(), page_number, process.page_table())?;

            if translation.is_hit() {
                process.record_hit();
            } else {
                process.record_miss();
            }

            accesses += 1;

            if process.advance() {
                break;
            }
        }

        Ok(DispatchOutcome::Ran {
            accesses,
            finished: process.is_finished(),
        })
    }

    /// Roda até todos os processos terminarem. Sem processos, não há nada a
    /// fazer e nenhuma vez é contada.
    pub fn run(&self, processes: &mut [Process], tlb: &mut Tlb) -> Result<RunSummary, TranslationError> {
        let mut summary = RunSummary::default();

        if processes.is_empty() {
            info!("dispatcher: no processes to run");
            return Ok(summary);
        }

        let mut unfinished = processes.iter().filter(|p| !p.is_finished()).count();
        let mut turn = 0;

        while unfinished > 0 {
            if let DispatchOutcome::Ran { accesses, finished } = self.dispatch(processes, turn, tlb)? {
                summary.accesses += accesses;

                if finished {
                    unfinished -= 1;
                }
            }

            summary.turns += 1;
            turn = (turn + 1) % processes.len();
        }

        info!(
            "dispatcher: done after {} turns and {} accesses ({} tlb entries)",
            summary.turns,
            summary.accesses,
            tlb.len()
        );

        Ok(summary)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Dispatcher::new(crate::constants::ACCESS_QUANTUM)
    }
}
