mod crops;
mod irrigation;
