pub mod mock_workspace;
