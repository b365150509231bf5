mod mocks;
mod social;
