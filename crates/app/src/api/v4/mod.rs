pub mod linear_playlist;
