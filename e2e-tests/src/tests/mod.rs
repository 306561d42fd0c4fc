mod poseidon2_pool;
mod utils;
