mod qdrant;

pub use qdrant::QdrantVectorIndex;
