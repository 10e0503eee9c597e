use crate::submitter::SubmitOptions;
use solana_sdk::pubkey::Pubkey;

/// Program address and submission options shared by every request.
pub struct ChainContext {
    program_id: Pubkey,
    submit_options: SubmitOptions,
}

impl ChainContext {
    /// Creates a new context.
    pub fn new(program_id: Pubkey, submit_options: SubmitOptions) -> Self {
        Self {
            program_id,
            submit_options,
        }
    }

    /// Address of the deployed AMM program.
    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    /// Options applied to every submission.
    pub fn submit_options(&self) -> &SubmitOptions {
        &self.submit_options
    }
}
