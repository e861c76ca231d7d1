// Discovery - read locally cached OS network state (no probing)

pub mod gateway;
pub mod neighbor;

pub use gateway::{parse_gateway, GatewayResolver};
pub use neighbor::{parse_neighbor_table, NeighborTableReader};
