mod layer_activation;
